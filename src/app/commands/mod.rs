//! Command handlers, one module per area.

/// `pin apply` and its report.
pub(crate) mod apply;
/// `pin apps` / `pin app ...`.
pub(crate) mod app;
/// `pin init`.
pub(crate) mod init;
/// `pin templates` / `pin template ...`.
pub(crate) mod template;
/// `pin themes` / `pin theme ...`.
pub(crate) mod theme;
