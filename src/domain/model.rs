use url::Url;

/// 區域索引頁中的一個市鎮連結
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityLink {
    pub code: String,
    pub name: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyVotes {
    pub party: String,
    pub votes: Option<u64>,
}

/// 市鎮詳細頁面解析出的數字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityPage {
    pub registered_voters: u64,
    pub envelopes_issued: u64,
    pub valid_votes: u64,
    pub party_votes: Vec<PartyVotes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityResult {
    pub code: String,
    pub name: String,
    pub registered_voters: u64,
    pub envelopes_issued: u64,
    pub valid_votes: u64,
    pub party_votes: Vec<PartyVotes>,
}

impl MunicipalityResult {
    pub fn new(link: &MunicipalityLink, page: MunicipalityPage) -> Self {
        Self {
            code: link.code.clone(),
            name: link.name.clone(),
            registered_voters: page.registered_voters,
            envelopes_issued: page.envelopes_issued,
            valid_votes: page.valid_votes,
            party_votes: page.party_votes,
        }
    }

    pub fn votes_for(&self, party: &str) -> Option<u64> {
        self.party_votes
            .iter()
            .find(|p| p.party == party)
            .and_then(|p| p.votes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
