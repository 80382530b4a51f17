use serde::Deserialize;

// Request para crear un conductor
#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub name: Option<String>,
}

// Request para actualizar un conductor por id
#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
}

// Request para borrar un conductor por id
#[derive(Debug, Deserialize)]
pub struct DeleteDriverRequest {
    pub id: Option<i64>,
}

// Filtros del listado
#[derive(Debug, Deserialize)]
pub struct DriverFilters {
    pub name: Option<String>,
}

// Query de /getOne; llega como string para poder responder con el mensaje
// del contrato cuando no es numérica.
#[derive(Debug, Deserialize)]
pub struct ShowDriverQuery {
    pub id: Option<String>,
}
