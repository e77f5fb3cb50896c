
mod request_counter_tests;
mod service_tests;
