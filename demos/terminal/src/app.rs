use codepad_client::{Session, SessionConfig, SessionEvent, TransportError};
use codepad_sandbox::{ExecutionSandbox, OutputConsole, SandboxConfig};
use codepad_shared::RoomIdentity;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Input {
    Connection(Option<SessionEvent>),
    Keyboard(Option<String>),
}

/// Line-oriented stand-in for the editor page: stdin lines edit the shared
/// buffer, `:`-commands drive the language selector, run control, and
/// output log.
pub struct App {
    session: Session,
    sandbox: ExecutionSandbox,
    console: OutputConsole,
}

impl App {
    pub async fn connect(authority: &str, room: &str, client: &str) -> Result<Self, TransportError> {
        let config = SessionConfig {
            server_authority: authority.to_string(),
            ..Default::default()
        };
        let identity = RoomIdentity::new(room, client);
        info!("joining room '{}' as '{}'", room, client);
        let session = Session::connect(config, identity).await?;
        Ok(Self {
            session,
            sandbox: ExecutionSandbox::start(SandboxConfig::default()),
            console: OutputConsole::new(),
        })
    }

    pub async fn run(mut self) {
        println!("type lines to edit; :lang <id>, :run, :clear, :status, :quit");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let input = tokio::select! {
                event = self.session.poll() => Input::Connection(event),
                line = lines.next_line() => Input::Keyboard(line.ok().flatten()),
            };
            match input {
                Input::Connection(Some(event)) => self.handle_event(event),
                Input::Connection(None) => {
                    println!("session ended");
                    break;
                }
                Input::Keyboard(Some(line)) => {
                    if !self.handle_line(line.trim_end()).await {
                        break;
                    }
                }
                Input::Keyboard(None) => break,
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StatusChanged(status) => println!("[status] {status:?}"),
            SessionEvent::TransportFailed(error) => println!("[error] {error}"),
            SessionEvent::DocumentReplaced(apply) => {
                // Reflecting into our "editor" is just printing the buffer;
                // the apply handle keeps the echo guard engaged meanwhile.
                println!("--- document ---");
                println!("{}", apply.content());
                println!("----------------");
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> bool {
        match line {
            ":quit" => return false,
            ":status" => println!(
                "[status] {:?} | language {}",
                self.session.status(),
                self.session.language()
            ),
            ":clear" => {
                self.console.clear();
                println!("{}", self.console.contents());
            }
            ":run" => self.run_buffer().await,
            "" => {}
            _ if line.starts_with(":lang") => {
                let id = line.trim_start_matches(":lang").trim();
                match self.session.select_language(id) {
                    Ok(switch) => {
                        println!(
                            "[language] {} (.{})",
                            switch.profile.id, switch.profile.grammar_extension
                        );
                        if switch.replacement.is_some() {
                            println!("--- document ---");
                            println!("{}", self.session.document());
                            println!("----------------");
                        }
                    }
                    Err(err) => println!("[error] {err}"),
                }
            }
            _ => {
                // Append the line to the shared buffer as a local edit.
                let mut next = self.session.document().to_string();
                if !next.is_empty() {
                    next.push('\n');
                }
                next.push_str(line);
                self.session.local_change(&next);
            }
        }
        true
    }

    async fn run_buffer(&mut self) {
        let language = self.session.language();
        if !self.sandbox.ready(language) {
            self.console
                .append_notice(&format!("{language} runtime is still loading..."));
            println!("{}", self.console.contents());
            return;
        }

        self.console.begin_run();
        let code = self.session.document().to_string();
        match self.sandbox.run(&code, language).await {
            Ok(outcome) => self.console.finish_run(&outcome),
            Err(err) => self.console.append_notice(&err.to_string()),
        }
        println!("{}", self.console.contents());
    }
}
