mod helpers;

mod test_build;
mod test_clean;
mod test_precondition;
mod test_release;
