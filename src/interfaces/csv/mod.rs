pub mod payee_reader;
