//! Line-oriented front end over the view models

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use vlogsnap_core::Registration;
use vlogsnap_net::SimulatedGateway;

use crate::state::AppState;
use crate::viewmodel::{AuthViewModel, FeedViewModel, RegisterForm, UploadDraft, VideoCard};

pub const HELP: &str = "\
Commands:
  login <email> <password>
  register <username> <email> <password> <confirm> <full name...>
  logout | whoami | bio <text...>
  feed | refresh | open <id> | close | like <id> | bookmark <id> | saved | search <query...>
  upload <title words...> [#tag ...]
  offline <on|off>
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register(Box<RegisterFormArgs>),
    Logout,
    WhoAmI,
    Bio(String),
    Feed,
    Refresh,
    Open(String),
    Close,
    Like(String),
    Bookmark(String),
    Saved,
    Search(String),
    Upload { title: String, hashtags: String },
    Offline(bool),
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFormArgs {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub full_name: String,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?;
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => Command::Usage("login <email> <password>"),
            ("register", [username, email, password, confirm, name @ ..]) => {
                Command::Register(Box::new(RegisterFormArgs {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    confirm: confirm.to_string(),
                    full_name: name.join(" "),
                }))
            }
            ("register", _) => {
                Command::Usage("register <username> <email> <password> <confirm> <full name...>")
            }
            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::WhoAmI,
            ("bio", text) => Command::Bio(text.join(" ")),
            ("feed", []) => Command::Feed,
            ("refresh", []) => Command::Refresh,
            ("close", []) => Command::Close,
            ("open", [id]) => Command::Open(id.to_string()),
            ("like", [id]) => Command::Like(id.to_string()),
            ("bookmark", [id]) => Command::Bookmark(id.to_string()),
            ("open" | "like" | "bookmark", _) => Command::Usage("<open|like|bookmark> <id>"),
            ("saved", []) => Command::Saved,
            ("search", query) => Command::Search(query.join(" ")),
            ("upload", words) => {
                let (tags, title): (Vec<&str>, Vec<&str>) =
                    words.iter().copied().partition(|w| w.starts_with('#'));
                Command::Upload {
                    title: title.join(" "),
                    hashtags: tags.join(" "),
                }
            }
            ("offline", ["on"]) => Command::Offline(true),
            ("offline", ["off"]) => Command::Offline(false),
            ("offline", _) => Command::Usage("offline <on|off>"),
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

pub struct Console {
    auth: AuthViewModel,
    feed: FeedViewModel,
    gateway: Arc<SimulatedGateway>,
}

impl Console {
    pub fn new(state: &AppState) -> Self {
        Self {
            auth: AuthViewModel::new(state.session.clone()),
            feed: FeedViewModel::new(state.content.clone(), state.session.clone()),
            gateway: state.gateway.clone(),
        }
    }

    /// Run one command, returning the lines to print
    pub async fn execute(&self, command: Command) -> Vec<String> {
        debug!(?command, "Executing command");
        match command {
            Command::Login { email, password } => {
                vec![self.auth.login(&email, &password).await.to_string()]
            }
            Command::Register(args) => {
                let form = RegisterForm {
                    registration: Registration {
                        full_name: args.full_name,
                        username: args.username,
                        email: args.email,
                        password: args.password,
                        phone: None,
                    },
                    confirm_password: args.confirm,
                };
                vec![self.auth.register(form).await.to_string()]
            }
            Command::Logout => vec![self.auth.logout().to_string()],
            Command::WhoAmI => match self.auth.profile() {
                Some(p) => vec![
                    format!("@{} ({}) <{}>", p.username, p.full_name, p.email),
                    format!(
                        "{} followers · {} following · {} videos",
                        p.followers, p.following, p.videos
                    ),
                    p.bio.unwrap_or_default(),
                ],
                None => vec!["Not signed in".to_string()],
            },
            Command::Bio(text) => vec![self.auth.update_bio(&text).to_string()],
            Command::Feed => {
                let empty = if self.feed.is_loading() {
                    "Loading..."
                } else {
                    "The feed is empty"
                };
                Self::render_cards(&self.feed.cards(), empty)
            }
            Command::Refresh => {
                self.feed.refresh().await;
                vec![format!("{} videos", self.feed.cards().len())]
            }
            Command::Close => {
                self.feed.close();
                Vec::new()
            }
            Command::Open(id) => match self.feed.open(&id) {
                Some(card) => {
                    let mut lines = Self::render_cards(std::slice::from_ref(&card), "");
                    if !card.hashtags.is_empty() {
                        lines.push(card.hashtags.join(" "));
                    }
                    lines
                }
                None => vec![format!("No video with id {}", id)],
            },
            Command::Like(id) => match self.feed.toggle_like(&id) {
                Some(card) => Self::render_cards(&[card], ""),
                None => vec![format!("No video with id {}", id)],
            },
            Command::Bookmark(id) => match self.feed.toggle_bookmark(&id) {
                Some(card) => Self::render_cards(&[card], ""),
                None => vec![format!("No video with id {}", id)],
            },
            Command::Saved => Self::render_cards(&self.feed.saved(), "No saved videos"),
            Command::Search(query) => {
                Self::render_cards(&self.feed.search(&query), "No videos match")
            }
            Command::Upload { title, hashtags } => {
                let draft = UploadDraft {
                    title,
                    hashtags,
                    duration: "0:00".to_string(),
                    ..UploadDraft::default()
                };
                vec![self.feed.publish(draft).to_string()]
            }
            Command::Offline(offline) => {
                self.gateway.set_offline(offline);
                vec![format!("Backend {}", if offline { "offline" } else { "online" })]
            }
            Command::Help => vec![HELP.to_string()],
            Command::Quit => Vec::new(),
            Command::Usage(usage) => vec![format!("Usage: {}", usage)],
            Command::Unknown(line) => vec![format!("Unknown command: {} (try `help`)", line)],
        }
    }

    fn render_cards(cards: &[VideoCard], empty: &str) -> Vec<String> {
        if cards.is_empty() {
            return vec![empty.to_string()];
        }
        cards
            .iter()
            .map(|c| {
                format!(
                    "[{}] {} · @{} · {} · {} · ♥ {}{} · 💬 {}{}",
                    c.id,
                    c.title,
                    c.username,
                    c.duration,
                    c.views,
                    c.likes,
                    if c.is_liked { " (liked)" } else { "" },
                    c.comments,
                    if c.is_bookmarked { " · saved" } else { "" },
                )
            })
            .collect()
    }
}

/// Read commands from stdin until `quit` or end of input
pub async fn run(state: Arc<AppState>) -> std::io::Result<()> {
    let console = Console::new(&state);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"VlogSnap console. Type `help` for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        };
        if command == Command::Quit {
            break;
        }
        for out in console.execute(command).await {
            stdout.write_all(out.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlogsnap_core::{AppConfig, GatewayConfig, MemoryKeyValue};

    fn console() -> (Console, Arc<AppState>) {
        let mut config = AppConfig::default();
        config.gateway = GatewayConfig::instant();
        let state = Arc::new(AppState::with_storage(
            &config,
            Arc::new(MemoryKeyValue::new()),
        ));
        (Console::new(&state), state)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), None);
        assert_eq!(
            Command::parse("login a@b.c pw"),
            Some(Command::Login {
                email: "a@b.c".to_string(),
                password: "pw".to_string()
            })
        );
        assert_eq!(
            Command::parse("login a@b.c"),
            Some(Command::Usage("login <email> <password>"))
        );
        assert_eq!(
            Command::parse("upload Night market #food #travel"),
            Some(Command::Upload {
                title: "Night market".to_string(),
                hashtags: "#food #travel".to_string()
            })
        );
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("offline on"), Some(Command::Offline(true)));
        assert!(matches!(Command::parse("dance"), Some(Command::Unknown(_))));
    }

    #[test]
    fn test_parse_register_joins_full_name() {
        match Command::parse("register samr sam@x.io secret1 secret1 Sam de Rivera") {
            Some(Command::Register(args)) => {
                assert_eq!(args.username, "samr");
                assert_eq!(args.full_name, "Sam de Rivera");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_flow() {
        let (console, state) = console();

        let out = console.execute(Command::WhoAmI).await;
        assert_eq!(out, vec!["Not signed in"]);

        let out = console
            .execute(Command::parse("login alex@example.com pw").unwrap())
            .await;
        assert_eq!(out, vec!["Welcome back, Alex Johnson!"]);
        assert!(state.session.is_authenticated());

        let out = console.execute(Command::WhoAmI).await;
        assert!(out[0].starts_with("@creativemind"));
        assert!(out[1].contains("45.6K followers"));

        console.execute(Command::Logout).await;
        assert!(!state.session.is_authenticated());

        console.execute(Command::Offline(true)).await;
        let out = console
            .execute(Command::parse("login alex@example.com pw").unwrap())
            .await;
        assert_eq!(out, vec!["Error: Invalid email or password"]);
        assert!(!state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_feed_flow() {
        let (console, state) = console();

        assert_eq!(console.execute(Command::Feed).await, vec!["The feed is empty"]);

        let out = console.execute(Command::Refresh).await;
        assert_eq!(out, vec!["3 videos"]);

        let out = console.execute(Command::Feed).await;
        assert_eq!(out.len(), 3);
        assert!(out[1].contains("♥ 6.2K"));

        console.execute(Command::Open("2".to_string())).await;
        assert_eq!(state.content.current_video().unwrap().id, "2");
        console.execute(Command::Close).await;
        assert!(state.content.current_video().is_none());

        let out = console.execute(Command::Like("2".to_string())).await;
        assert!(out[0].contains("(liked)"));

        let out = console.execute(Command::Like("99".to_string())).await;
        assert_eq!(out, vec!["No video with id 99"]);

        console.execute(Command::Bookmark("1".to_string())).await;
        let out = console.execute(Command::Saved).await;
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("[1]"));
    }

    #[tokio::test]
    async fn test_upload_flow() {
        let (console, state) = console();
        let upload = Command::parse("upload Sunset run #fitness").unwrap();

        let out = console.execute(upload.clone()).await;
        assert_eq!(out, vec!["Error: Please log in to upload videos"]);

        state.session.login("alex@example.com", "pw").await;
        let out = console.execute(upload).await;
        assert_eq!(out, vec!["Video uploaded successfully!"]);
        assert_eq!(state.content.len(), 1);
        assert_eq!(state.content.with_hashtag("fitness").len(), 1);
    }
}
