pub mod generate;

#[cfg(test)]
mod generate_tests;
