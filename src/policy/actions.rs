// src/policy/actions.rs

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::principal::{Principal, Role};
use crate::policy::route::Section;

// O que a interface pode mostrar/disparar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    WelcomePanel,
    StoreDashboard,
    List,
    View,
    Add,
    Edit,
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionSet(BTreeSet<Action>);

impl ActionSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(actions: &[Action]) -> Self {
        Self(actions.iter().copied().collect())
    }

    pub fn read() -> Self {
        Self::of(&[Action::List, Action::View])
    }

    pub fn manage() -> Self {
        Self::of(&[Action::List, Action::View, Action::Add, Action::Edit, Action::Delete])
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Fatos de posse sobre o recurso alvo, do ponto de vista do usuário logado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ownership {
    pub own_store: bool,
    pub in_sub_stores: bool,
    pub assigned_category: bool,
}

impl Ownership {
    pub fn for_store(principal: &Principal, store_id: &str) -> Self {
        Self {
            own_store: principal.owns_store(store_id),
            in_sub_stores: principal.has_sub_store(store_id),
            assigned_category: false,
        }
    }

    // Todos os fatos verdadeiros: se nem assim a ação aparece, o cargo nunca a terá
    pub fn any() -> Self {
        Self {
            own_store: true,
            in_sub_stores: true,
            assigned_category: true,
        }
    }

    // Atribuída = está na lista do principal ou o técnico da categoria é ele
    pub fn for_category(principal: &Principal, category_id: &str, assigned_user: Option<&str>) -> Self {
        Self {
            assigned_category: principal.is_assigned_to(category_id)
                || assigned_user == Some(principal.id.as_str()),
            ..Self::default()
        }
    }
}

/// A tabela de permissões do console.
///
/// Um único `match` exaustivo sobre (cargo, área): adicionar um cargo ou uma
/// área novos não compila até a tabela ser completada.
pub fn resolve_actions(role: Role, section: Section, ownership: Ownership) -> ActionSet {
    use Action::*;
    use Role::*;

    match (role, section) {
        (_, Section::Auth | Section::Unknown) => ActionSet::none(),

        // --- Home ---
        (SuperAdmin, Section::Home) => ActionSet::of(&[WelcomePanel]),
        (StoreAdmin | StoreSubAdmin, Section::Home) => ActionSet::of(&[StoreDashboard]),
        (_, Section::Home) => ActionSet::none(),

        // --- Usuários ---
        (SuperAdmin, Section::Users) => ActionSet::manage(),
        (StoreAdmin | StoreSubAdmin, Section::Users) if ownership.own_store => ActionSet::manage(),
        (_, Section::Users) => ActionSet::none(),

        // --- Lojas ---
        (SuperAdmin, Section::Stores) => ActionSet::manage(),
        (StoreAdmin | StoreSubAdmin, Section::Stores)
            if ownership.own_store || ownership.in_sub_stores =>
        {
            ActionSet::of(&[View, Edit])
        }
        (LeadTech, Section::Stores) if ownership.own_store => ActionSet::of(&[View]),
        (_, Section::Stores) => ActionSet::none(),

        // --- Sub-lojas (a posse é da loja mãe) ---
        (SuperAdmin, Section::SubStores) => ActionSet::manage(),
        (StoreAdmin | StoreSubAdmin, Section::SubStores) if ownership.own_store => ActionSet::manage(),
        (_, Section::SubStores) => ActionSet::none(),

        // --- Categorias ---
        (SuperAdmin, Section::Categories) => ActionSet::read(),
        (StoreAdmin | StoreSubAdmin | LeadTech, Section::Categories) => ActionSet::manage(),
        (Tech, Section::Categories) if ownership.assigned_category => ActionSet::manage(),
        (Tech, Section::Categories) => ActionSet::of(&[List]),
        (Salesman | Accountant | Admin | User, Section::Categories) => ActionSet::read(),

        // --- Produtos ---
        (SuperAdmin, Section::Products) => ActionSet::read(),
        (StoreAdmin | StoreSubAdmin | LeadTech, Section::Products) => ActionSet::manage(),
        (Tech, Section::Products) if ownership.assigned_category => ActionSet::read(),
        (Tech, Section::Products) => ActionSet::of(&[List]),
        (Salesman | Accountant | Admin | User, Section::Products) => ActionSet::read(),
    }
}

// Abas do painel direito das páginas de detalhe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Overview,
    SubStores,
    Users,
    Categories,
    Products,
    SubCategories,
}

pub fn detail_tabs(role: Role, section: Section, ownership: Ownership) -> Vec<Tab> {
    let can_view = resolve_actions(role, section, ownership).contains(Action::View);

    match section {
        Section::Stores => match role {
            Role::SuperAdmin => vec![Tab::Overview, Tab::SubStores, Tab::Users],
            Role::StoreAdmin | Role::StoreSubAdmin if can_view => vec![
                Tab::Overview,
                Tab::SubStores,
                Tab::Users,
                Tab::Categories,
                Tab::Products,
            ],
            Role::LeadTech if can_view => vec![Tab::Categories, Tab::Products],
            _ => Vec::new(),
        },
        // Técnico fora da categoria: só as abas de sub-categorias e produtos, sem visão geral
        Section::Categories if role == Role::Tech && !ownership.assigned_category => {
            vec![Tab::SubCategories, Tab::Products]
        }
        Section::Categories if can_view => vec![Tab::Overview, Tab::SubCategories, Tab::Products],
        Section::Users | Section::SubStores | Section::Products if can_view => vec![Tab::Overview],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::*;

    const SECTIONS: [Section; 6] = [
        Section::Home,
        Section::Users,
        Section::Stores,
        Section::SubStores,
        Section::Categories,
        Section::Products,
    ];

    fn owner() -> Ownership {
        Ownership {
            own_store: true,
            in_sub_stores: true,
            assigned_category: true,
        }
    }

    // Tabela esperada com posse total (own store, sub-loja, categoria atribuída)
    fn expected_with_ownership(role: Role, section: Section) -> ActionSet {
        let none = ActionSet::none();
        let read = ActionSet::read();
        let manage = ActionSet::manage();
        match (role, section) {
            (Role::SuperAdmin, Section::Home) => ActionSet::of(&[WelcomePanel]),
            (Role::SuperAdmin, Section::Users | Section::Stores | Section::SubStores) => manage,
            (Role::SuperAdmin, _) => read,

            (Role::StoreAdmin | Role::StoreSubAdmin, Section::Home) => ActionSet::of(&[StoreDashboard]),
            (Role::StoreAdmin | Role::StoreSubAdmin, Section::Stores) => ActionSet::of(&[View, Edit]),
            (Role::StoreAdmin | Role::StoreSubAdmin, _) => manage,

            (Role::LeadTech, Section::Stores) => ActionSet::of(&[View]),
            (Role::LeadTech, Section::Categories | Section::Products) => manage,
            (Role::LeadTech, _) => none,

            (Role::Tech, Section::Categories) => manage,
            (Role::Tech, Section::Products) => read,
            (Role::Tech, _) => none,

            (_, Section::Categories | Section::Products) => read,
            (_, _) => none,
        }
    }

    // Sem nenhuma posse
    fn expected_without_ownership(role: Role, section: Section) -> ActionSet {
        match (role, section) {
            (Role::SuperAdmin, _) => expected_with_ownership(role, section),
            (Role::StoreAdmin | Role::StoreSubAdmin, Section::Home) => ActionSet::of(&[StoreDashboard]),
            (Role::StoreAdmin | Role::StoreSubAdmin | Role::LeadTech, Section::Categories | Section::Products) => {
                ActionSet::manage()
            }
            (Role::Tech, Section::Categories | Section::Products) => ActionSet::of(&[List]),
            (Role::Salesman | Role::Accountant | Role::Admin | Role::User, Section::Categories | Section::Products) => {
                ActionSet::read()
            }
            _ => ActionSet::none(),
        }
    }

    #[test]
    fn every_role_and_section_matches_the_table() {
        for role in Role::ALL {
            for section in SECTIONS {
                assert_eq!(
                    resolve_actions(role, section, owner()),
                    expected_with_ownership(role, section),
                    "{role:?} / {section:?} (owner)"
                );
                assert_eq!(
                    resolve_actions(role, section, Ownership::default()),
                    expected_without_ownership(role, section),
                    "{role:?} / {section:?} (stranger)"
                );
            }
        }
    }

    #[test]
    fn auth_and_unknown_sections_grant_nothing() {
        for role in Role::ALL {
            assert!(resolve_actions(role, Section::Auth, owner()).is_empty());
            assert!(resolve_actions(role, Section::Unknown, owner()).is_empty());
        }
    }

    #[test]
    fn read_only_roles_never_get_the_add_button() {
        for role in [Role::Salesman, Role::Accountant, Role::User, Role::Admin] {
            let actions = resolve_actions(role, Section::Categories, owner());
            assert!(!actions.contains(Add));
            assert!(!actions.contains(Edit));
        }
    }

    #[test]
    fn tech_sees_overview_only_on_assigned_categories() {
        let principal = Principal {
            id: "t1".into(),
            full_name: "Téc".into(),
            email: "tec@storex.com".into(),
            role: Role::Tech,
            store: Some("s1".into()),
            sub_stores: vec![],
            categories: vec!["c1".into()],
        };

        let assigned = Ownership::for_category(&principal, "c1", None);
        let tabs = detail_tabs(Role::Tech, Section::Categories, assigned);
        assert_eq!(tabs, vec![Tab::Overview, Tab::SubCategories, Tab::Products]);

        // Atribuído pelo campo `user` da categoria, mesmo fora da lista do principal
        let by_user = Ownership::for_category(&principal, "c7", Some("t1"));
        assert!(detail_tabs(Role::Tech, Section::Categories, by_user).contains(&Tab::Overview));

        let stranger = Ownership::for_category(&principal, "c2", Some("other"));
        let tabs = detail_tabs(Role::Tech, Section::Categories, stranger);
        assert_eq!(tabs, vec![Tab::SubCategories, Tab::Products]);
        let actions = resolve_actions(Role::Tech, Section::Categories, stranger);
        assert!(!actions.contains(Add));
        assert!(!actions.contains(Edit));
    }

    #[test]
    fn store_tabs_follow_role() {
        let own = Ownership {
            own_store: true,
            ..Ownership::default()
        };
        assert_eq!(
            detail_tabs(Role::SuperAdmin, Section::Stores, Ownership::default()),
            vec![Tab::Overview, Tab::SubStores, Tab::Users]
        );
        assert_eq!(detail_tabs(Role::StoreAdmin, Section::Stores, own).len(), 5);
        assert!(detail_tabs(Role::StoreAdmin, Section::Stores, Ownership::default()).is_empty());
        assert_eq!(
            detail_tabs(Role::LeadTech, Section::Stores, own),
            vec![Tab::Categories, Tab::Products]
        );
        assert!(detail_tabs(Role::Salesman, Section::Stores, own).is_empty());
    }
}
