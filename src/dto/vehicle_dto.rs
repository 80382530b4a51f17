use serde::Deserialize;

// Request para crear un vehículo
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub brand: Option<String>,
    pub color: Option<String>,
    pub plate: Option<String>,
}

// Request para actualizar un vehículo por id; los campos ausentes conservan
// el valor actual.
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub id: Option<i64>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub plate: Option<String>,
}

// Request para borrar un vehículo por id
#[derive(Debug, Deserialize)]
pub struct DeleteVehicleRequest {
    pub id: Option<i64>,
}

// Filtros del listado; se combinan con AND
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub brand: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShowVehicleQuery {
    pub id: Option<String>,
}
