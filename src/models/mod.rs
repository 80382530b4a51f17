//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL.

pub mod assignment;
pub mod driver;
pub mod vehicle;
