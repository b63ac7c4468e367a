//! Error and success banners.
//!
//! A banner is a title followed by an optional ordered list of items,
//! inserted as the first child of the form. Showing a banner replaces any
//! banner of the same kind and scrolls it into view. The title is inserted
//! as markup; list items are escaped.

use uniform_rs_core::utils::text::escape_html;

use crate::host::{BannerKind, FormHost};

/// Renders the inner markup of a banner.
///
/// # Examples
///
/// ```
/// use uniform_rs_forms::banner::render;
///
/// let html = render("Sorry, this form needs corrections.", &["Email is required".to_string()]);
/// assert_eq!(
///     html,
///     "<h3>Sorry, this form needs corrections.</h3><ol><li>Email is required</li></ol>"
/// );
/// assert_eq!(render("Thanks!", &[]), "<h3>Thanks!</h3>");
/// ```
pub fn render(title: &str, items: &[String]) -> String {
    let mut html = format!("<h3>{title}</h3>");
    if !items.is_empty() {
        html.push_str("<ol>");
        for item in items {
            html.push_str("<li>");
            html.push_str(&escape_html(item));
            html.push_str("</li>");
        }
        html.push_str("</ol>");
    }
    html
}

/// Renders a banner into the form, replacing one of the same kind.
pub fn show(host: &mut dyn FormHost, kind: BannerKind, title: &str, items: &[String]) {
    let html = render(title, items);
    host.remove_banner(kind);
    host.prepend_banner(kind, &html);
    host.scroll_to_banner(kind);
}

/// The default blocked-submit handler: shows the error banner and keeps
/// the form from submitting.
pub fn show_form_error(host: &mut dyn FormHost, title: &str, items: &[String]) -> bool {
    show(host, BannerKind::Error, title, items);
    false
}

/// Shows the success banner.
pub fn show_form_success(host: &mut dyn FormHost, title: &str) {
    show(host, BannerKind::Success, title, &[]);
}
