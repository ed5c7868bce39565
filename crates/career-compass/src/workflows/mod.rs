pub mod career_test;
