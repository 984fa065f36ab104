use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use reversi::Event;

/// Collects the events of a game and writes them to a JSON file when the game ends.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    events: Vec<Event>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            events: Vec::new(),
        })
    }

    pub fn store_event(&mut self, event: &Event) {
        if let Event::Reset { .. } = event {
            // The abandoned game is not recorded
            self.events.clear();
        }
        self.events.push(event.clone());
    }

    /// Writes `game_NNNNNN.json` and starts a new recording.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &std::mem::take(&mut self.events))?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use reversi::{Disk, GameState};

    use super::*;

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Recorder::new(dir.path().join("nope")).is_err());
    }

    #[test]
    fn writes_numbered_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::new(dir.path().to_path_buf()).unwrap();

        recorder.store_event(&Event::Started {
            state: GameState::initial(),
        });
        recorder.store_event(&Event::Finished {
            winner: Some(Disk::Dark),
        });
        let first = recorder.write_game_recording().unwrap();
        assert_eq!(first, dir.path().join("game_000001.json"));

        let events: Vec<Event> =
            serde_json::from_reader(File::open(&first).unwrap()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Event::Finished { winner: Some(Disk::Dark) });

        let second = recorder.write_game_recording().unwrap();
        assert_eq!(second, dir.path().join("game_000002.json"));
        let events: Vec<Event> =
            serde_json::from_reader(File::open(&second).unwrap()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn reset_discards_the_abandoned_game() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::new(dir.path().to_path_buf()).unwrap();
        recorder.store_event(&Event::TurnChanged { disk: Disk::Light });
        recorder.store_event(&Event::Reset {
            state: GameState::initial(),
        });
        let path = recorder.write_game_recording().unwrap();
        let events: Vec<Event> = serde_json::from_reader(File::open(path).unwrap()).unwrap();
        assert_eq!(
            events,
            vec![Event::Reset {
                state: GameState::initial()
            }]
        );
    }
}
