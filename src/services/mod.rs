//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. El motor de
//! asignaciones vive acá: validación pura por un lado, orquestación con
//! efectos por el otro.

pub mod assignment_service;
pub mod assignment_validator;

pub use assignment_service::*;
pub use assignment_validator::*;
