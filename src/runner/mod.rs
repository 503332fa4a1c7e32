pub mod ds;
pub mod object;
pub mod plugin;
