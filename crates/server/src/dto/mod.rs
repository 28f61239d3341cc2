mod colors;
pub mod itinerary;
pub mod stop;
