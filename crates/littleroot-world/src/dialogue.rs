//! Dialogue engine: a typewriter interpreter over text/action entries.
//!
//! Entries are consumed two at a time: both are shown in the dialogue box
//! together. Every text tick reveals one more character of the first line;
//! once it is complete the second line starts revealing. Action entries do
//! not render, they are handed back to the caller to perform.
//!
//!   Idle ──start──► Presenting ──confirm past the end──► Exhausted
//!                      │
//!                      └─ any other key (if cancellable) ─► Idle

/// Side effect triggered by reaching an action entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    /// Open the mart's shop panel
    OpenShop,
    /// Switch the dialogue into name entry
    ChooseName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Text(String),
    Action(ScriptAction),
}

impl Entry {
    /// Full reveal length in characters; actions have none
    pub fn len(&self) -> usize {
        match self {
            Entry::Text(t) => t.chars().count(),
            Entry::Action(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered dialogue entries. Text is upper-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueScript {
    entries: Vec<Entry>,
}

impl DialogueScript {
    pub fn new(entries: Vec<Entry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| match e {
                Entry::Text(t) => Entry::Text(t.to_uppercase()),
                other => other,
            })
            .collect();
        Self { entries }
    }

    /// Script made only of text lines
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Entry::Text(l.to_string())).collect())
    }

    /// Append an action after the existing entries
    pub fn then(mut self, action: ScriptAction) -> Self {
        self.entries.push(Entry::Action(action));
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn splice_text(&mut self, index: usize, lines: &[String]) {
        let texts = lines.iter().map(|l| Entry::Text(l.to_uppercase()));
        let end = (index + 1).min(self.entries.len());
        self.entries.splice(index..end, texts);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    Presenting,
    /// Typing the player's name; confirm is disabled
    NameEntry,
    Exhausted,
}

/// Longest name the entry box accepts
pub const MAX_NAME_LEN: usize = 12;

/// An active dialogue: script plus cursor and reveal state
#[derive(Debug, Clone)]
pub struct Dialogue {
    script: DialogueScript,
    /// Index of the first visible entry; even, or `script.len()`
    cursor: usize,
    /// Visible characters of the two displayed lines
    reveal: [usize; 2],
    /// Whether the action in each slot has already been handed out
    fired: [bool; 2],
    cancellable: bool,
    /// Pending name and the script slot the name-entry action came from
    name_entry: Option<(String, usize)>,
}

impl Dialogue {
    /// Start presenting `script` from the top
    pub fn start(script: DialogueScript, cancellable: bool) -> Self {
        let mut d = Self {
            script,
            cursor: 0,
            reveal: [0, 0],
            fired: [false, false],
            cancellable,
            name_entry: None,
        };
        d.reset_pair();
        tracing::debug!("Dialogue started ({} entries)", d.script.len());
        d
    }

    pub fn phase(&self) -> DialoguePhase {
        if self.name_entry.is_some() {
            DialoguePhase::NameEntry
        } else if self.cursor >= self.script.len() {
            DialoguePhase::Exhausted
        } else {
            DialoguePhase::Presenting
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase() == DialoguePhase::Exhausted
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reveal(&self) -> [usize; 2] {
        self.reveal
    }

    pub fn script(&self) -> &DialogueScript {
        &self.script
    }

    fn slot(&self, i: usize) -> Option<&Entry> {
        self.script.entries.get(self.cursor + i)
    }

    fn slot_len(&self, i: usize) -> usize {
        self.slot(i).map(Entry::len).unwrap_or(0)
    }

    fn slot_done(&self, i: usize) -> bool {
        match self.slot(i) {
            None => true,
            Some(Entry::Text(_)) => self.reveal[i] >= self.slot_len(i),
            Some(Entry::Action(_)) => self.fired[i],
        }
    }

    /// Both visible lines fully shown and both actions performed
    pub fn pair_complete(&self) -> bool {
        self.slot_done(0) && self.slot_done(1)
    }

    fn reset_pair(&mut self) {
        self.reveal = [self.slot_len(0).min(1), 0];
        self.fired = [false, false];
    }

    fn fire(&mut self, i: usize, out: &mut Vec<ScriptAction>) {
        if let Some(Entry::Action(action)) = self.slot(i).cloned() {
            if !self.fired[i] {
                self.fired[i] = true;
                tracing::debug!("Dialogue action {:?} at entry {}", action, self.cursor + i);
                if action == ScriptAction::ChooseName {
                    self.name_entry = Some((String::new(), self.cursor + i));
                }
                out.push(action);
            }
        }
    }

    /// One text tick. Returns actions reached by the reveal.
    pub fn tick(&mut self) -> Vec<ScriptAction> {
        let mut actions = Vec::new();
        if self.phase() != DialoguePhase::Presenting {
            return actions;
        }

        match self.slot(0) {
            Some(Entry::Text(_)) => {
                if self.reveal[0] < self.slot_len(0) {
                    self.reveal[0] += 1;
                }
            }
            Some(Entry::Action(_)) => self.fire(0, &mut actions),
            None => {}
        }

        if self.slot_done(0) && self.phase() == DialoguePhase::Presenting {
            match self.slot(1) {
                Some(Entry::Text(_)) => {
                    if self.reveal[1] < self.slot_len(1) {
                        self.reveal[1] += 1;
                    }
                }
                Some(Entry::Action(_)) => self.fire(1, &mut actions),
                None => {}
            }
        }
        actions
    }

    /// The accept key. Completes a partly shown pair, otherwise moves on to
    /// the next pair. Returns actions fired by fast-forwarding.
    pub fn confirm(&mut self) -> Vec<ScriptAction> {
        let mut actions = Vec::new();
        if self.phase() != DialoguePhase::Presenting {
            return actions;
        }

        if !self.pair_complete() {
            self.reveal = [self.slot_len(0), self.slot_len(1)];
            self.fire(0, &mut actions);
            if self.name_entry.is_none() {
                self.fire(1, &mut actions);
            }
            return actions;
        }

        self.cursor = (self.cursor + 2).min(self.script.len());
        self.reset_pair();
        if self.is_exhausted() {
            tracing::debug!("Dialogue exhausted");
        }
        actions
    }

    /// Text currently visible in the two lines of the box
    pub fn visible_lines(&self) -> [Option<String>; 2] {
        let line = |i: usize| match self.slot(i) {
            Some(Entry::Text(t)) => Some(t.chars().take(self.reveal[i]).collect()),
            _ => None,
        };
        if self.phase() == DialoguePhase::Exhausted {
            return [None, None];
        }
        [line(0), line(1)]
    }

    /// Pending name while in name entry
    pub fn pending_name(&self) -> Option<&str> {
        self.name_entry.as_ref().map(|(n, _)| n.as_str())
    }

    /// Append a typed character to the pending name
    pub fn type_char(&mut self, ch: char) {
        if let Some((name, _)) = &mut self.name_entry {
            if (ch.is_ascii_alphanumeric() || ch == ' ') && name.chars().count() < MAX_NAME_LEN {
                name.extend(ch.to_uppercase());
            }
        }
    }

    pub fn erase_char(&mut self) {
        if let Some((name, _)) = &mut self.name_entry {
            name.pop();
        }
    }

    /// Leave name entry: the name-entry slot is replaced by `lines(name)`
    /// and presentation resumes there. Returns the entered name.
    pub fn finish_name_entry<F>(&mut self, lines: F) -> Option<String>
    where
        F: FnOnce(&str) -> Vec<String>,
    {
        let (name, slot) = self.name_entry.take()?;
        let replacement = lines(&name);
        self.script.splice_text(slot, &replacement);
        self.cursor = slot - slot % 2;
        self.reset_pair();
        tracing::info!("Name entered: {}", name);
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> Dialogue {
        Dialogue::start(DialogueScript::lines(&["hello", "world"]), true)
    }

    #[test]
    fn text_is_uppercased() {
        let s = DialogueScript::lines(&["hello", "world"]);
        assert_eq!(
            s.entries(),
            &[Entry::Text("HELLO".into()), Entry::Text("WORLD".into())]
        );
    }

    #[test]
    fn starts_with_one_char_of_first_line() {
        let d = hello();
        assert_eq!(d.reveal(), [1, 0]);
        assert_eq!(d.phase(), DialoguePhase::Presenting);
        assert_eq!(d.visible_lines(), [Some("H".into()), Some(String::new())]);
    }

    #[test]
    fn two_ticks_reveal_three_chars() {
        let mut d = hello();
        d.tick();
        d.tick();
        assert_eq!(d.reveal()[0], 3);
        assert_eq!(d.visible_lines()[0].as_deref(), Some("HEL"));
    }

    #[test]
    fn second_line_waits_for_first() {
        let mut d = hello();
        for _ in 0..3 {
            d.tick();
        }
        assert_eq!(d.reveal(), [4, 0]);
        d.tick();
        assert_eq!(d.reveal(), [5, 1]);
        for _ in 0..20 {
            d.tick();
        }
        assert_eq!(d.reveal(), [5, 5]);
        assert!(d.pair_complete());
    }

    #[test]
    fn reveal_is_monotone_and_bounded() {
        let mut d = Dialogue::start(DialogueScript::lines(&["ab", "cdef", "g"]), true);
        let mut last = d.reveal();
        for _ in 0..30 {
            d.tick();
            let r = d.reveal();
            assert!(r[0] >= last[0] && r[1] >= last[1]);
            assert!(r[0] <= 2 && r[1] <= 4);
            last = r;
        }
    }

    #[test]
    fn confirm_fast_forwards_then_advances() {
        let mut d = Dialogue::start(DialogueScript::lines(&["one", "two", "three"]), true);
        d.tick();
        d.confirm();
        assert_eq!(d.cursor(), 0);
        assert_eq!(d.reveal(), [3, 3]);

        d.confirm();
        assert_eq!(d.cursor(), 2);
        assert_eq!(d.reveal(), [1, 0]);

        d.confirm();
        d.confirm();
        assert_eq!(d.cursor(), 3);
        assert!(d.is_exhausted());
        assert_eq!(d.visible_lines(), [None, None]);
    }

    #[test]
    fn cursor_stays_even_or_terminal() {
        let mut d = Dialogue::start(DialogueScript::lines(&["a", "b", "c", "d", "e"]), true);
        while !d.is_exhausted() {
            d.confirm();
            assert!(d.cursor() % 2 == 0 || d.cursor() == 5);
        }
        // further confirms are ignored
        d.confirm();
        assert_eq!(d.cursor(), 5);
    }

    #[test]
    fn empty_script_is_exhausted() {
        let d = Dialogue::start(DialogueScript::default(), true);
        assert!(d.is_exhausted());
    }

    #[test]
    fn second_slot_action_fires_after_first_line() {
        let script = DialogueScript::lines(&["hey"]).then(ScriptAction::OpenShop);
        let mut d = Dialogue::start(script, true);
        assert!(d.tick().is_empty());
        assert_eq!(d.reveal()[0], 2);
        assert_eq!(d.tick(), vec![ScriptAction::OpenShop]);
        assert!(d.tick().is_empty());
        assert!(d.pair_complete());
    }

    #[test]
    fn confirm_fires_pending_action_once() {
        let script = DialogueScript::lines(&["what would you like to buy?"]).then(ScriptAction::OpenShop);
        let mut d = Dialogue::start(script, true);
        assert_eq!(d.confirm(), vec![ScriptAction::OpenShop]);
        assert!(d.tick().is_empty());
        assert!(d.confirm().is_empty());
        assert!(d.is_exhausted());
    }

    #[test]
    fn first_slot_action_fires_immediately() {
        let script = DialogueScript::lines(&["a", "b"]).then(ScriptAction::ChooseName);
        let mut d = Dialogue::start(script, false);
        d.confirm();
        d.confirm();
        assert_eq!(d.cursor(), 2);
        assert_eq!(d.reveal(), [0, 0]);
        assert_eq!(d.tick(), vec![ScriptAction::ChooseName]);
        assert_eq!(d.phase(), DialoguePhase::NameEntry);
    }

    #[test]
    fn name_entry_collects_chars_and_resumes() {
        let script = DialogueScript::lines(&["a", "b"]).then(ScriptAction::ChooseName);
        let mut d = Dialogue::start(script, false);
        d.confirm();
        d.confirm();
        d.tick();

        // confirm is disabled while typing
        assert!(d.confirm().is_empty());
        for ch in "may!".chars() {
            d.type_char(ch);
        }
        d.type_char('x');
        d.erase_char();
        assert_eq!(d.pending_name(), Some("MAY"));

        let name = d.finish_name_entry(|n| vec![format!("nice to meet you {n}!"), "bye".into()]);
        assert_eq!(name.as_deref(), Some("MAY"));
        assert_eq!(d.phase(), DialoguePhase::Presenting);
        assert_eq!(d.cursor(), 2);
        assert_eq!(d.script().len(), 4);
        assert_eq!(d.visible_lines()[0].as_deref(), Some("N"));
        d.confirm();
        assert_eq!(d.visible_lines()[0].as_deref(), Some("NICE TO MEET YOU MAY!"));
        assert_eq!(d.visible_lines()[1].as_deref(), Some("BYE"));
    }

    #[test]
    fn name_is_capped() {
        let script = DialogueScript::default().then(ScriptAction::ChooseName);
        let mut d = Dialogue::start(script, false);
        d.tick();
        for _ in 0..30 {
            d.type_char('a');
        }
        assert_eq!(d.pending_name().map(str::len), Some(MAX_NAME_LEN));
    }
}
