pub mod run_evaluation;
