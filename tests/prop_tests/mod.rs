// Property suites
mod prop_benchmark;
mod prop_sentiment;
