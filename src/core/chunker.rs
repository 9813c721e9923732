//! Windowed chunking of an oversized day.
//!
//! When a day's serialized text exceeds the character budget, it is split
//! into windows of whole messages. Consecutive windows overlap by a
//! configured number of trailing messages so the model keeps cross-window
//! context. Messages are atomic: a window boundary never splits one.
//!
//! The split is greedy: messages accumulate into the current window while
//! the serialized length stays within budget; the next window is seeded
//! with the previous window's trailing messages.
//!
//! Overflow rules:
//! - A single message longer than the whole budget becomes its own window
//!   and is passed through whole.
//! - The overlap seed shrinks from the front when it would otherwise push
//!   the window over budget, so overlap never blocks forward progress.

use crate::Message;
use crate::config::ChunkConfig;
use crate::core::daily::DailyLog;

/// One window of contiguous messages from a day.
///
/// The first [`overlap`](Self::overlap) messages repeat the tail of the
/// previous chunk; [`new_messages`](Self::new_messages) is the part unique
/// to this chunk.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    messages: &'a [Message],
    overlap: usize,
}

impl<'a> Chunk<'a> {
    /// All messages in the chunk, overlap included.
    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }

    /// How many leading messages are repeated from the previous chunk.
    ///
    /// Always 0 for the first chunk.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// The messages not covered by a previous chunk.
    pub fn new_messages(&self) -> &'a [Message] {
        &self.messages[self.overlap..]
    }

    /// The chunk rendered as `Sender: content` lines.
    pub fn serialized(&self) -> String {
        let mut out = String::new();
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&msg.serialized());
        }
        out
    }

    /// Character count of [`serialized`](Self::serialized).
    pub fn serialized_len(&self) -> usize {
        let newlines = self.messages.len().saturating_sub(1);
        self.messages
            .iter()
            .map(Message::serialized_len)
            .sum::<usize>()
            + newlines
    }
}

/// Lazy iterator over the chunks of a message sequence.
///
/// Finite and restartable: building a new `Chunks` over the same messages
/// and config restarts the split from the beginning.
pub struct Chunks<'a> {
    messages: &'a [Message],
    config: ChunkConfig,
    /// Index of the first message not yet covered by an emitted chunk.
    pos: usize,
    /// Length of the previously emitted chunk, for overlap clamping.
    prev_chunk_len: usize,
}

impl<'a> Chunks<'a> {
    /// Starts a fresh split of `messages` under `config`.
    pub fn new(messages: &'a [Message], config: ChunkConfig) -> Self {
        Self {
            messages,
            config,
            pos: 0,
            prev_chunk_len: 0,
        }
    }

    /// Per-message cost in the running total: serialized length plus the
    /// joining newline. The total over a window is the sum minus one.
    fn cost(msg: &Message) -> usize {
        msg.serialized_len() + 1
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        if self.pos >= self.messages.len() {
            return None;
        }

        let budget = self.config.max_chunk_chars;
        let covered = self.pos;

        // Seed with the previous chunk's tail.
        let overlap = if covered == 0 {
            0
        } else {
            self.config.overlap_messages.min(self.prev_chunk_len)
        };
        let mut start = covered - overlap;

        let mut sum: usize = self.messages[start..covered].iter().map(Self::cost).sum();

        // The first new message always goes in; shrink the seed if it
        // would push the window over budget.
        sum += Self::cost(&self.messages[covered]);
        while sum - 1 > budget && start < covered {
            sum -= Self::cost(&self.messages[start]);
            start += 1;
        }
        let mut end = covered + 1;

        // Greedy accumulation.
        while end < self.messages.len() {
            let next_cost = Self::cost(&self.messages[end]);
            if sum + next_cost - 1 > budget {
                break;
            }
            sum += next_cost;
            end += 1;
        }

        self.prev_chunk_len = end - start;
        self.pos = end;

        Some(Chunk {
            messages: &self.messages[start..end],
            overlap: covered - start,
        })
    }
}

impl DailyLog {
    /// Splits the day into overlapping windows under `config`.
    ///
    /// A day that fits within the budget yields exactly one chunk equal to
    /// the whole log. Each call restarts the split.
    pub fn chunks(&self, config: ChunkConfig) -> Chunks<'_> {
        Chunks::new(self.messages(), config)
    }
}
