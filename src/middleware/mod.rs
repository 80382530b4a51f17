//! Middleware del sistema
//!
//! Este módulo contiene el middleware HTTP compartido por las rutas.

pub mod cors;

pub use cors::*;
