// Components module - reusable UI building blocks
//
// Shell components (title bar, status bar, system logs, toasts) render in
// every frame; the domain panels (libraries, tabs, histogram, logs) fill
// the main content area. Each component is a focused, single-responsibility
// module.

pub mod formatters;
pub mod histogram;
pub mod library_list;
pub mod logs_panel;
pub mod pane_tabs;
pub mod scrollbar;
pub mod status_bar;
pub mod syslog_panel;
pub mod title_bar;
pub mod toast;

pub use toast::{Toast, ToastStack, DELETE_TOAST_KEY};
