use super::{Contest, FetchError, Participant, Standings, StandingsSource};
use crate::configuration::CodeforcesSettings;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// General response from the Codeforces API.
/// Codeforces documentation: https://codeforces.com/apiHelp
#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE", tag = "status")]
enum CFResponse<T> {
    Ok { result: T },
    Failed { comment: String },
}

/// The result of a contest.standings call; the problem list is ignored.
/// Codeforces documentation: https://codeforces.com/apiHelp/methods#contest.standings
#[derive(Deserialize)]
struct CFStandings {
    contest: CFContest,
    rows: Vec<CFRanklistRow>,
}

/// A Contest object from the Codeforces API.
/// Codeforces documentation: https://codeforces.com/apiHelp/objects#Contest
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CFContest {
    id: usize,
    name: String,
    phase: Option<String>,
    start_time_seconds: Option<i64>,
}

/// A RanklistRow object from the Codeforces API.
/// Codeforces documentation: https://codeforces.com/apiHelp/objects#RanklistRow
#[derive(Deserialize)]
struct CFRanklistRow {
    party: CFParty,
    rank: usize,
    points: f64,
}

#[derive(Deserialize)]
struct CFParty {
    members: Vec<CFMember>,
}

#[derive(Deserialize)]
struct CFMember {
    handle: String,
    rating: Option<i32>,
}

pub fn codeforces_human_url(contest_id: usize) -> String {
    format!("https://codeforces.com/contest/{}/standings", contest_id)
}

impl From<CFContest> for Contest {
    fn from(contest: CFContest) -> Self {
        Self {
            id: contest.id,
            name: contest.name,
            phase: contest.phase,
            start_time_seconds: contest.start_time_seconds,
        }
    }
}

impl TryFrom<CFStandings> for Standings {
    type Error = String;

    /// Checks the integrity of our API response and convert it into a more convenient format.
    fn try_from(json_standings: CFStandings) -> Result<Self, Self::Error> {
        let id = json_standings.contest.id;
        let len = json_standings.rows.len();
        let mut seen_handles = HashMap::with_capacity(len);
        let mut participants = Vec::with_capacity(len);

        for (i, row) in json_standings.rows.into_iter().enumerate() {
            if row.party.members.len() > 1 {
                tracing::debug!(
                    "Contest {}: team at position {} rated by its first member",
                    id,
                    i
                );
            }
            let Some(member) = row.party.members.into_iter().next() else {
                tracing::debug!(
                    "Contest {}: skipping memberless party at position {}",
                    id,
                    i
                );
                continue;
            };
            if let Some(j) = seen_handles.insert(member.handle.clone(), i) {
                return Err(format!(
                    "Duplicate user {} at positions {} and {}",
                    member.handle, j, i
                ));
            }
            participants.push(Participant {
                handle: member.handle,
                rating: member.rating,
                points: row.points,
                raw_rank: row.rank,
            });
        }

        Ok(Self {
            contest: json_standings.contest.into(),
            participants,
        })
    }
}

/// Live standings from the Codeforces API, requested with a blocking HTTP client.
#[derive(Debug)]
pub struct CodeforcesApi {
    client: Client,
    base_url: String,
    from: usize,
    count: usize,
}

impl CodeforcesApi {
    pub fn new(settings: &CodeforcesSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            from: settings.from,
            count: settings.count,
        })
    }

    fn standings_url(&self) -> String {
        format!("{}/contest.standings", self.base_url)
    }
}

impl StandingsSource for CodeforcesApi {
    /// Retrieves the first `count` rows of the standings of the given contest.
    #[tracing::instrument(name = "Fetching contest standings", skip(self), fields(from = self.from, count = self.count))]
    fn fetch(&self, contest_id: usize) -> Result<Standings, FetchError> {
        let response = self
            .client
            .get(self.standings_url())
            .query(&[
                ("contestId", contest_id),
                ("from", self.from),
                ("count", self.count),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Codeforces responded with HTTP status {}", status);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let packet: CFResponse<CFStandings> = response
            .json()
            .map_err(|e| FetchError::Schema(e.to_string()))?;
        match packet {
            CFResponse::Ok { result } => {
                let standings = Standings::try_from(result).map_err(FetchError::Schema)?;
                tracing::info!(
                    "Fetched {} rows of {}",
                    standings.participants.len(),
                    standings.contest.name
                );
                Ok(standings)
            }
            CFResponse::Failed { comment } => Err(FetchError::Api { comment }),
        }
    }

    fn cache_key(&self, contest_id: usize) -> String {
        format!("{}_{}_{}", contest_id, self.from, self.count)
    }
}
