pub mod cscan;
