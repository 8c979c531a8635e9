//! Named routes, path resolution and the navigation history.

use std::fmt;

use log::debug;

/// Every place the application can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, the login form
    Login,
    /// `/register`, the registration form
    Register,
    /// `/homepage`, behind the session gate
    Homepage,
    /// Where the session gate sends visitors without a session
    Restricted,
    /// A path no screen is mapped to
    NotFound(String),
}

impl Route {
    /// Resolve a path to a route.
    ///
    /// Route group segments such as `(tabs)` do not take part in matching,
    /// so `/(tabs)/register`, `/(tabs)register` and `/register` are the same
    /// route. `/`, `/index` and `/(tabs)` all resolve to the login form.
    pub fn resolve(path: &str) -> Route {
        let normalized = normalize(path);
        match normalized.as_str() {
            "/" | "/index" => Route::Login,
            "/register" => Route::Register,
            "/homepage" => Route::Homepage,
            _ => Route::NotFound(normalized),
        }
    }

    /// The canonical path of this route
    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Homepage => "/homepage",
            Route::Restricted => "/restricted",
            Route::NotFound(path) => path,
        }
    }

    /// Whether this route renders the fallback view
    pub fn is_fallback(&self) -> bool {
        matches!(self, Route::Restricted | Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn normalize(path: &str) -> String {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        let mut rest = segment;
        // drop leading group markers like `(tabs)`, keeping what follows
        while let Some(stripped) = rest.strip_prefix('(') {
            match stripped.find(')') {
                Some(end) => rest = &stripped[end + 1..],
                None => break,
            }
        }
        if !rest.is_empty() {
            segments.push(rest);
        }
    }
    format!("/{}", segments.join("/"))
}

/// One entry of the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub label: &'static str,
    pub path: &'static str,
}

/// The tab bar, in display order
pub static TABS: [Tab; 3] = [
    Tab {
        label: "Login",
        path: "/",
    },
    Tab {
        label: "Register",
        path: "/register",
    },
    Tab {
        label: "Homepage",
        path: "/homepage",
    },
];

/// A change of the current route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Push(Route),
    Replace(Route),
    Back(Route),
}

/// Navigation history.
///
/// The stack is never empty; the bottom entry is where the app started.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    events: Vec<NavEvent>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    /// Start at `initial`
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
            events: Vec::new(),
        }
    }

    /// The current route
    pub fn current(&self) -> &Route {
        static START: Route = Route::Login;
        // `stack` always holds at least the initial route
        self.stack.last().unwrap_or(&START)
    }

    /// Navigate forward to `route`
    pub fn push(&mut self, route: Route) {
        debug!("push {}", route);
        self.stack.push(route.clone());
        self.events.push(NavEvent::Push(route));
    }

    /// Swap the current route for `route`, leaving no history entry
    pub fn replace(&mut self, route: Route) {
        debug!("replace {} with {}", self.current(), route);
        if let Some(top) = self.stack.last_mut() {
            *top = route.clone();
        }
        self.events.push(NavEvent::Replace(route));
    }

    /// Return to the previous route; false when already at the start
    pub fn back(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        self.stack.pop();
        let route = self.current().clone();
        self.events.push(NavEvent::Back(route));
        true
    }

    /// Every navigation so far, oldest first
    pub fn events(&self) -> &[NavEvent] {
        &self.events
    }

    /// The tab matching the current route, if the route is a tab
    pub fn active_tab(&self) -> Option<&'static Tab> {
        let current = self.current();
        TABS.iter().find(|tab| Route::resolve(tab.path) == *current)
    }
}
