use std::collections::HashMap;

use super::{PlayerId, Ranking};

/// Tallies nominations, most votes first. Nominees with the same count are
/// adjacent and ordered by id.
pub fn score_poll<'a, I>(nominees: I) -> Ranking
where
    I: IntoIterator<Item = &'a PlayerId>,
{
    let mut tally: HashMap<&PlayerId, usize> = HashMap::new();
    for nominee in nominees {
        *tally.entry(nominee).or_insert(0) += 1;
    }

    let mut ranking = tally
        .into_iter()
        .map(|(nominee, votes)| (nominee.clone(), votes))
        .collect::<Vec<_>>();
    ranking.sort_by(|(a, a_votes), (b, b_votes)| b_votes.cmp(a_votes).then_with(|| a.cmp(b)));
    ranking
}

/// True when no single nominee leads the poll.
pub fn is_draw(ranking: &[(PlayerId, usize)]) -> bool {
    match ranking {
        [] => true,
        [(_, first), (_, second), ..] => first == second,
        [_] => false,
    }
}
