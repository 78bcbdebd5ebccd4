//! Interactive menu front end
//!
//! [`Session`] owns the menu loop; the handler modules each implement one
//! group of menu commands on top of the storage, report and backup layers.

pub mod backup;
pub mod console;
pub mod expense;
pub mod menu;
pub mod report;
pub mod session;

pub use console::Console;
pub use menu::{render_menu, MenuCommand};
pub use session::{Session, SessionState};
