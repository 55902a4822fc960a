pub mod bom_line;
pub mod material;
pub mod product;
