//! Helper functions shared by the renderer, templates and generator

pub mod date;
pub mod html;
pub mod url;

pub use date::format_date;
pub use html::{escape_attr, escape_text, is_void_element, strip_html, truncate, unescape};
pub use url::{encode_query, full_url_for, url_for};
