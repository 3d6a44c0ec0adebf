pub mod load_query;
