pub mod dbus;

pub use dbus::DbusServiceHandler;
