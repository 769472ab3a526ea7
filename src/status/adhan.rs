use std::io::Write;
use std::process::{Child, Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no player command configured")]
    NoPlayer,
    #[error("failed to start player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal bell failed: {0}")]
    Bell(#[from] std::io::Error),
}

/// Something that can play the adhan once the banner switches to it.
pub trait AdhanPlayer {
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Polled every tick while the adhan is showing. Players that cannot
    /// tell when they are done never report it.
    fn finished(&mut self) -> bool {
        false
    }
}

/// Rings the terminal bell. Used when no player command is configured.
#[derive(Debug, Default)]
pub struct BellPlayer;

impl AdhanPlayer for BellPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Runs an external audio player with the adhan url as its last argument.
#[derive(Debug)]
pub struct CommandPlayer {
    command: Vec<String>,
    url: String,
    child: Option<Child>,
}

impl CommandPlayer {
    pub fn new(command: Vec<String>, url: impl Into<String>) -> Self {
        Self {
            command,
            url: url.into(),
            child: None,
        }
    }
}

impl AdhanPlayer for CommandPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let (program, args) = self.command.split_first().ok_or(PlaybackError::NoPlayer)?;
        let child = Command::new(program)
            .args(args)
            .arg(&self.url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PlaybackError::Spawn {
                program: program.clone(),
                source,
            })?;
        log::info!("Playing adhan with '{}'", program);
        self.child = Some(child);
        Ok(())
    }

    fn finished(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("Adhan player exited with {}", status);
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::debug!("Could not poll adhan player: {}", e);
                self.child = None;
                true
            }
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Pick a player from the `[adhan]` config section.
pub fn player_from_config(config: &crate::config::settings::AdhanConfig) -> Box<dyn AdhanPlayer> {
    if config.player.is_empty() {
        Box::new(BellPlayer)
    } else {
        Box::new(CommandPlayer::new(config.player.clone(), config.url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        let mut player = CommandPlayer::new(vec![], "https://example.com/adhan.mp3");
        assert!(matches!(player.play(), Err(PlaybackError::NoPlayer)));
        assert!(!player.finished());
    }

    #[test]
    fn missing_program_reports_spawn_error() {
        let mut player = CommandPlayer::new(
            vec!["roza-no-such-player-binary".to_string()],
            "https://example.com/adhan.mp3",
        );
        assert!(matches!(player.play(), Err(PlaybackError::Spawn { .. })));
    }
}
