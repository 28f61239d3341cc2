mod engine_tests;
mod itinerary_tests;
mod label_tests;
