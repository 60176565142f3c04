pub mod numeric_utils;
