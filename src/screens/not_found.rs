//! Static screen for unmapped or disallowed routes.

use crate::router::Route;
use crate::view::{Element, View};

pub const FALLBACK_HEADER: &str = "Unrestricted Access";

pub fn view() -> View {
    let mut view = View::new().with_header(FALLBACK_HEADER);
    view.push(Element::Link {
        label: "Please Login First".to_string(),
        path: Route::Login.path().to_string(),
    });
    view.push(Element::Text("Dont have an Account?".to_string()));
    view.push(Element::Link {
        label: "Register".to_string(),
        path: Route::Register.path().to_string(),
    });
    view
}
