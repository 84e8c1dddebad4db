pub mod selection;
pub mod test_utils;
