//! Command dispatch from the messaging gateway to the tournament registry.

use crate::commands::{Command, HELP, ParseError, parse_command};
use crate::tournament::{
    NewTournament, Participant, ParticipantId, Slot, TournamentError, TournamentRegistry,
    TournamentStatus, render::PENDING_MARKER,
};

/// Default upper bound for `create_tournament`
pub const DEFAULT_MAX_PARTICIPANTS_LIMIT: usize = 128;

/// Discord limits embed field values to 1024 characters
const STANDINGS_LIMIT: usize = 1024;

/// User who sent a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: ParticipantId,
    pub display_name: String,
    pub channel_id: Option<u64>,
}

impl Caller {
    pub fn new(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            channel_id: None,
        }
    }

    pub fn in_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }
}

/// Text sent back to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The command succeeded
    pub ok: bool,
    /// Registry state changed and should be persisted
    pub changed: bool,
}

impl Reply {
    fn success(text: impl Into<String>, changed: bool) -> Self {
        Self {
            text: text.into(),
            ok: true,
            changed,
        }
    }

    fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            text: format!("❌ {}", message),
            ok: false,
            changed: false,
        }
    }
}

impl From<TournamentError> for Reply {
    fn from(error: TournamentError) -> Self {
        Reply::failure(error.client_message())
    }
}

impl From<ParseError> for Reply {
    fn from(error: ParseError) -> Self {
        Reply::failure(error)
    }
}

/// Turns parsed commands into registry calls and formatted replies
#[derive(Clone)]
pub struct CommandHandler {
    registry: TournamentRegistry,
    max_participants_limit: usize,
}

impl CommandHandler {
    pub fn new(registry: TournamentRegistry) -> Self {
        Self {
            registry,
            max_participants_limit: DEFAULT_MAX_PARTICIPANTS_LIMIT,
        }
    }

    /// Cap the participant count accepted by `create_tournament`
    pub fn with_max_participants_limit(mut self, limit: usize) -> Self {
        self.max_participants_limit = limit;
        self
    }

    pub fn registry(&self) -> &TournamentRegistry {
        &self.registry
    }

    /// Parse and run one command text (prefix already stripped)
    pub async fn handle_text(&self, caller: &Caller, input: &str) -> Reply {
        match parse_command(input) {
            Ok(command) => self.handle(caller, command).await,
            Err(e) => e.into(),
        }
    }

    /// Run one command on behalf of `caller`
    pub async fn handle(&self, caller: &Caller, command: Command) -> Reply {
        let changed = command.is_mutating();
        let result = match command {
            Command::Create {
                max_participants,
                name,
                description,
            } => {
                self.create(caller, max_participants, name, description)
                    .await
            }
            Command::Join { name } => self.join(caller, &name).await,
            Command::Leave { name } => self
                .registry
                .leave(&name, caller.id)
                .await
                .map(|_| format!("✅ You left the tournament **{}**", name))
                .map_err(Reply::from),
            Command::Start { name } => self.start(caller, &name).await,
            Command::Report {
                name,
                round,
                match_number,
                winner,
            } => {
                self.report(caller, &name, round, match_number, winner)
                    .await
            }
            Command::Info { name } => self.info(&name).await,
            Command::End { name } => self.end(caller, &name).await,
            Command::List => Ok(self.list().await),
            Command::Bracket { name } => self
                .registry
                .render_bracket(&name)
                .await
                .map(|view| format!("🏆 {}", view))
                .map_err(Reply::from),
            Command::Help => Ok(HELP.to_string()),
        };

        match result {
            Ok(text) => Reply::success(text, changed),
            Err(reply) => reply,
        }
    }

    async fn create(
        &self,
        caller: &Caller,
        max_participants: usize,
        name: String,
        description: String,
    ) -> Result<String, Reply> {
        if max_participants > self.max_participants_limit {
            return Err(Reply::failure(format!(
                "At most {} participants are allowed!",
                self.max_participants_limit
            )));
        }

        let mut params =
            NewTournament::new(name, max_participants, caller.id).with_description(description);
        if let Some(channel_id) = caller.channel_id {
            params = params.in_channel(channel_id);
        }

        let summary = self.registry.create(params).await?;
        let mut text = format!("🎯 Tournament: {}", summary.name);
        if !summary.description.is_empty() {
            text.push_str(&format!("\n{}", summary.description));
        }
        text.push_str(&format!(
            "\nMax participants: {}\nStatus: Registration open\nParticipants: 0\nCreator: {}\nUse `join {}` to take part",
            summary.max_participants, caller.display_name, summary.name
        ));
        Ok(text)
    }

    async fn join(&self, caller: &Caller, name: &str) -> Result<String, Reply> {
        let listing = self
            .registry
            .join(name, Participant::new(caller.id, caller.display_name.clone()))
            .await?;

        Ok(format!(
            "✅ **{}** joined the tournament **{}**\nParticipants: {}/{}",
            caller.display_name, name, listing.participant_count, listing.max_participants
        ))
    }

    async fn start(&self, caller: &Caller, name: &str) -> Result<String, Reply> {
        let summary = self.registry.start(name, caller.id).await?;
        let bracket = self.registry.render_bracket(name).await?;

        Ok(format!(
            "🎯 Tournament {} has started!\nParticipants: {}\nCurrent round: {}\n\n🏆 {}",
            name,
            summary.participants.len(),
            summary.current_round,
            bracket
        ))
    }

    async fn report(
        &self,
        caller: &Caller,
        name: &str,
        round: u32,
        match_number: usize,
        winner: Slot,
    ) -> Result<String, Reply> {
        let outcome = self
            .registry
            .report_and_render(name, caller.id, round, match_number, winner)
            .await?;

        let winner_name = outcome
            .winner
            .as_ref()
            .map_or(PENDING_MARKER, |p| p.name.as_str());

        Ok(format!(
            "✅ Result recorded\nMatch winner: **{}**\n\n🏆 {}",
            winner_name, outcome.bracket
        ))
    }

    async fn info(&self, name: &str) -> Result<String, Reply> {
        let summary = self.registry.summary(name).await?;

        let mut text = format!("🎯 Tournament: {}", summary.name);
        if !summary.description.is_empty() {
            text.push_str(&format!("\n{}", summary.description));
        }
        text.push_str(&format!(
            "\nStatus: {}\nParticipants: {}/{}\nCurrent round: {}",
            status_label(summary.status),
            summary.participants.len(),
            summary.max_participants,
            summary.current_round
        ));

        if !summary.participants.is_empty() {
            let standings: String = summary
                .participants
                .iter()
                .map(|p| format!("• {} (wins: {}, losses: {})", p.name, p.wins, p.losses))
                .collect::<Vec<_>>()
                .join("\n");
            text.push_str("\nParticipants:\n");
            text.push_str(truncate_chars(&standings, STANDINGS_LIMIT));
        }

        Ok(text)
    }

    async fn end(&self, caller: &Caller, name: &str) -> Result<String, Reply> {
        let outcome = self.registry.close(name, caller.id).await?;

        let mut text = format!("🏁 Tournament {} is finished!", outcome.name);
        match outcome.champion {
            Some(champion) => text.push_str(&format!(
                "\n🏆 Winner: {}\nWins/Losses: {}-{}",
                champion.name, champion.wins, champion.losses
            )),
            None => text.push_str("\nWinner: undetermined"),
        }
        Ok(text)
    }

    async fn list(&self) -> String {
        let listings = self.registry.list_all().await;
        if listings.is_empty() {
            return "❌ There are no tournaments!".to_string();
        }

        let rows: Vec<String> = listings
            .iter()
            .map(|l| {
                format!(
                    "{}: {} ({}/{} participants)",
                    l.name,
                    status_label(l.status),
                    l.participant_count,
                    l.max_participants
                )
            })
            .collect();
        format!("📋 Tournaments\n{}", rows.join("\n"))
    }
}

fn status_label(status: TournamentStatus) -> &'static str {
    match status {
        TournamentStatus::Registration => "📝 Registration",
        TournamentStatus::Active => "⚡ Active",
        TournamentStatus::Finished => "🏁 Finished",
    }
}

/// Cut to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
