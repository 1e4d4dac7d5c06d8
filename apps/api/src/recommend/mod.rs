// Recommendation pipeline: fetch page → discover links → extract jobs → rank.
// Every upstream failure degrades to a smaller result; only request
// validation is reported back to the caller.

pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod links;
pub mod pipeline;
pub mod prompts;
pub mod recommender;
