//! Quote ranking

use xroute_types::{Amount, Quote, RankingPolicy};

/// Ordering key for a policy; lower is better
fn sort_key(quote: &Quote, policy: RankingPolicy) -> Amount {
	match policy {
		RankingPolicy::Fastest => Amount::from(quote.estimated_duration_seconds),
		// Fees in different tokens are summed as raw base units. This is an
		// approximation: 1 wei of ETH and 1 unit of USDC count the same.
		RankingPolicy::Cheapest => quote.total_fee(),
	}
}

/// Best quote under `policy`; ties go to the earliest quote
pub fn select_best(quotes: &[Quote], policy: RankingPolicy) -> Option<&Quote> {
	quotes.iter().min_by_key(|q| sort_key(q, policy))
}

/// All quotes ordered best-first, stable for ties
pub fn rank(quotes: &[Quote], policy: RankingPolicy) -> Vec<Quote> {
	let mut ranked = quotes.to_vec();
	ranked.sort_by_key(|q| sort_key(q, policy));
	ranked
}
