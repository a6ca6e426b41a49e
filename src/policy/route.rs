// src/policy/route.rs

use serde::Serialize;

// A área do console a que uma rota pertence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Home,
    Users,
    Stores,
    SubStores,
    Categories,
    Products,
    Auth,
    Unknown,
}

impl Section {
    // Rota da lista na interface (usada no link "voltar" dos alertas)
    pub fn list_route(&self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Users => "/users",
            Section::Stores => "/stores",
            Section::SubStores => "/sub-stores",
            Section::Categories => "/categories",
            Section::Products => "/products",
            Section::Auth => "/login",
            Section::Unknown => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Landing,
    List,
    Detail(String),
    Login,
    Register,
    RegisterStore,
    Other,
}

/// A rota atual da interface (ex.: "/categories/view/abc"), já interpretada.
///
/// O mesmo componente de lista/detalhe é usado na visão global ("/categories")
/// e na visão "minha loja" ("/home/category"), então o caminho REST depende disto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    path: String,
    section: Section,
    page: Page,
    under_home: bool,
}

fn section_of(segment: &str) -> Section {
    match segment {
        "users" | "user" => Section::Users,
        "stores" | "store" => Section::Stores,
        "sub-stores" | "sub-store" => Section::SubStores,
        "categories" | "category" => Section::Categories,
        "products" | "product" => Section::Products,
        _ => Section::Unknown,
    }
}

fn page_of(rest: &[&str]) -> Page {
    match rest {
        [] => Page::List,
        ["view", id, ..] => Page::Detail((*id).to_string()),
        _ => Page::Other,
    }
}

impl RouteContext {
    pub fn parse(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or("").trim();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let (section, page, under_home) = match segments.as_slice() {
            [] | ["home"] => (Section::Home, Page::Landing, true),
            ["home", area, rest @ ..] => (section_of(area), page_of(rest), true),
            ["login"] => (Section::Auth, Page::Login, false),
            ["register"] => (Section::Auth, Page::Register, false),
            ["register", "store"] => (Section::Auth, Page::RegisterStore, false),
            [area, rest @ ..] => {
                let section = section_of(area);
                let page = if section == Section::Unknown { Page::Other } else { page_of(rest) };
                (section, page, false)
            }
        };

        let normalized = format!("/{}", segments.join("/"));
        Self {
            path: normalized,
            section,
            page,
            under_home,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_under_home(&self) -> bool {
        self.under_home
    }

    pub fn detail_id(&self) -> Option<&str> {
        match &self.page {
            Page::Detail(id) => Some(id),
            _ => None,
        }
    }

    // O id da loja quando a rota é o detalhe de uma loja (/stores/view/:id)
    pub fn store_detail_id(&self) -> Option<&str> {
        if self.section == Section::Stores { self.detail_id() } else { None }
    }

    pub fn is_public(&self) -> bool {
        matches!(self.page, Page::Login | Page::Register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_console_routes() {
        let cases = [
            ("/", Section::Home, Page::Landing, true),
            ("/home", Section::Home, Page::Landing, true),
            ("/home/category", Section::Categories, Page::List, true),
            ("/home/product/view/p1", Section::Products, Page::Detail("p1".into()), true),
            ("/categories", Section::Categories, Page::List, false),
            ("/categories/view/c1", Section::Categories, Page::Detail("c1".into()), false),
            ("/stores/view/s1?tab=users", Section::Stores, Page::Detail("s1".into()), false),
            ("/users/", Section::Users, Page::List, false),
            ("/login", Section::Auth, Page::Login, false),
            ("/register/store", Section::Auth, Page::RegisterStore, false),
            ("/reports", Section::Unknown, Page::Other, false),
        ];

        for (raw, section, page, under_home) in cases {
            let route = RouteContext::parse(raw);
            assert_eq!(route.section(), section, "{raw}");
            assert_eq!(route.page(), &page, "{raw}");
            assert_eq!(route.is_under_home(), under_home, "{raw}");
        }
    }

    #[test]
    fn store_detail_id_only_for_store_pages() {
        assert_eq!(RouteContext::parse("/stores/view/s1").store_detail_id(), Some("s1"));
        assert_eq!(RouteContext::parse("/categories/view/c1").store_detail_id(), None);
        assert_eq!(RouteContext::parse("/stores/view/s1/").path(), "/stores/view/s1");
    }
}
