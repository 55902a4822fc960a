// Core services
pub mod bom;
pub mod materials;
pub mod orders;
pub mod products;
