//! Screen controllers composing the client with the shared view-state machine.
//!
//! # Design
//! A screen owns one `RemoteResource` and a `MemberClient`, nothing else
//! touches network state. Mount (or refresh, or a tracked parameter change)
//! returns a `Fetch`: the request for the host to execute plus the generation
//! to hand back with the outcome. The host reports either the `HttpResponse`
//! or the transport failure message; the screen parses, applies the state
//! transition, and renders from state alone.
//!
//! Three screens, mirroring the app: a flat roster, the richer list with
//! row navigation and refresh, and the detail screen with the independent
//! enlarged-avatar toggle.

use crate::client::MemberClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render;
use crate::resource::{RemoteResource, ResourceState};
use crate::types::Member;

/// A fetch handed to the host: execute `request`, then pass `generation`
/// together with the outcome back to the screen's `deliver`.
#[derive(Debug)]
pub struct Fetch {
    pub generation: u64,
    pub request: HttpRequest,
}

/// The outcome the host reports: a response, or the transport failure text.
pub type FetchOutcome = Result<HttpResponse, String>;

fn parse_outcome<T>(
    outcome: FetchOutcome,
    parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    outcome.map_err(ApiError::Transport).and_then(parse)
}

/// Flat member list: one mount fetch, no navigation, no refresh gesture.
#[derive(Debug)]
pub struct RosterScreen {
    client: MemberClient,
    members: RemoteResource<Vec<Member>>,
}

impl RosterScreen {
    pub fn new(client: MemberClient) -> Self {
        Self {
            client,
            members: RemoteResource::new(),
        }
    }

    pub fn mount(&mut self) -> Fetch {
        Fetch {
            generation: self.members.begin(),
            request: self.client.build_list_members(),
        }
    }

    pub fn deliver(&mut self, generation: u64, outcome: FetchOutcome) -> bool {
        let result = parse_outcome(outcome, |response| self.client.parse_list_members(response));
        self.members.complete(generation, result)
    }

    pub fn state(&self) -> &ResourceState<Vec<Member>> {
        self.members.state()
    }

    pub fn render(&self) -> String {
        render::member_list(self.members.state())
    }
}

/// Member list with tappable rows and pull-to-refresh.
#[derive(Debug)]
pub struct ListScreen {
    client: MemberClient,
    members: RemoteResource<Vec<Member>>,
}

impl ListScreen {
    pub fn new(client: MemberClient) -> Self {
        Self {
            client,
            members: RemoteResource::new(),
        }
    }

    pub fn mount(&mut self) -> Fetch {
        Fetch {
            generation: self.members.begin(),
            request: self.client.build_list_members(),
        }
    }

    /// Pull-to-refresh: previously displayed rows stay visible until the new
    /// outcome arrives.
    pub fn refresh(&mut self) -> Fetch {
        Fetch {
            generation: self.members.begin_refresh(),
            request: self.client.build_list_members(),
        }
    }

    pub fn deliver(&mut self, generation: u64, outcome: FetchOutcome) -> bool {
        let result = parse_outcome(outcome, |response| self.client.parse_list_members(response));
        self.members.complete(generation, result)
    }

    /// Navigation target for a tapped row, in rendered order.
    pub fn member_id_at(&self, index: usize) -> Option<u64> {
        self.members.data().and_then(|members| members.get(index)).map(|m| m.id)
    }

    pub fn state(&self) -> &ResourceState<Vec<Member>> {
        self.members.state()
    }

    pub fn render(&self) -> String {
        render::member_list(self.members.state())
    }
}

/// One member's profile, plus the enlarged-avatar overlay toggle.
///
/// The tracked `member_id` is the screen's navigation parameter: changing it
/// re-enters loading and refetches. `avatar_enlarged` is pure presentation
/// state, independent of the fetch state machine.
#[derive(Debug)]
pub struct DetailScreen {
    client: MemberClient,
    member_id: u64,
    member: RemoteResource<Member>,
    avatar_enlarged: bool,
}

impl DetailScreen {
    pub fn new(client: MemberClient, member_id: u64) -> Self {
        Self {
            client,
            member_id,
            member: RemoteResource::new(),
            avatar_enlarged: false,
        }
    }

    pub fn member_id(&self) -> u64 {
        self.member_id
    }

    pub fn mount(&mut self) -> Fetch {
        Fetch {
            generation: self.member.begin(),
            request: self.client.build_get_member(self.member_id),
        }
    }

    /// Change the tracked navigation parameter; re-enters loading and returns
    /// the fetch for the new id. A still-running fetch for the old id becomes
    /// stale and its late outcome is dropped.
    pub fn set_member_id(&mut self, member_id: u64) -> Fetch {
        self.member_id = member_id;
        self.mount()
    }

    pub fn deliver(&mut self, generation: u64, outcome: FetchOutcome) -> bool {
        let result = parse_outcome(outcome, |response| self.client.parse_get_member(response));
        self.member.complete(generation, result)
    }

    /// Tap on the avatar or the name header: flips the overlay.
    pub fn toggle_avatar(&mut self) {
        self.avatar_enlarged = !self.avatar_enlarged;
    }

    /// Tap anywhere on the overlay: always closes it.
    pub fn dismiss_overlay(&mut self) {
        self.avatar_enlarged = false;
    }

    pub fn avatar_enlarged(&self) -> bool {
        self.avatar_enlarged
    }

    pub fn state(&self) -> &ResourceState<Member> {
        self.member.state()
    }

    pub fn render(&self) -> String {
        render::member_detail(self.member.state(), self.avatar_enlarged)
    }
}
