// src/datareader/mod.rs
//
// CSV seed data

pub mod csv_data_reader;
pub mod population;

pub use csv_data_reader::{parse_pub_date, CatalogueData, CsvDataReader};
pub use population::{populate, populate_from, PopulationSummary};
