pub mod data_store;
