pub mod configurator;
