//! Game management with a tree of played and variation positions.
//!
//! The [`Game`] struct owns every position reached so far in an arena. Each
//! node knows its parent and its children; the first child continues the main
//! line and later children are variations. Repetition is counted along the
//! path from the current node back to the root.

use crate::movegen::IllegalMove;
use crate::position::Signature;
use crate::rules::{classify, DrawRules, GameStatus};
use crate::{MoveList, Position};
use gambit_core::{FenError, Move, NotationError, Promotion, Square};
use std::fmt;
use thiserror::Error;

/// Handle to a position stored in a [`Game`].
///
/// A handle is an index into the game that issued it and stays valid in
/// clones of that game. [`NodeId::ROOT`] is valid in every game. Handles
/// from an unrelated game are not detected when their index is in range,
/// so callers must only pass a game the handles it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The starting position of every game.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move token could not be read.
    #[error(transparent)]
    InvalidNotation(#[from] NotationError),
    /// The move is not legal in the current position.
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),
    /// The current position is already terminal.
    #[error("game is over: {0}")]
    GameOver(GameStatus),
    /// The handle does not belong to this game.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

#[derive(Debug, Clone)]
struct GameNode {
    position: Position,
    /// Move that led here from the parent; `None` at the root.
    mov: Option<Move>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    signature: Signature,
}

impl GameNode {
    fn new(position: Position, mov: Option<Move>, parent: Option<NodeId>) -> Self {
        let signature = position.signature();
        GameNode {
            position,
            mov,
            parent,
            children: Vec::new(),
            signature,
        }
    }
}

/// A chess game with its full tree of explored lines.
///
/// Unlike [`Position`], which represents a single board state, `Game` keeps
/// the ancestry needed for repetition detection and lets callers step back
/// and forth through the lines played so far.
#[derive(Debug, Clone)]
pub struct Game {
    nodes: Vec<GameNode>,
    current: NodeId,
    rules: DrawRules,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Game {
            nodes: vec![GameNode::new(position, None, None)],
            current: NodeId::ROOT,
            rules: DrawRules::default(),
        }
    }

    /// Creates a game from a state string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position))
    }

    /// Replaces the draw thresholds.
    pub fn with_rules(mut self, rules: DrawRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the draw thresholds in use.
    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    /// Returns the handle of the current position.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.node(self.current).position
    }

    /// Returns the position stored at `id`.
    pub fn position_at(&self, id: NodeId) -> Result<&Position, GameError> {
        self.get(id).map(|node| &node.position)
    }

    /// Returns the state string of the current position.
    pub fn to_fen(&self) -> String {
        self.position().to_fen()
    }

    /// Number of positions stored, variations included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Classifies the current position.
    pub fn status(&self) -> GameStatus {
        classify(self.position(), self.repetition_count(), &self.rules)
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        self.position().legal_moves()
    }

    /// Plays a move from the current position and makes the result current.
    ///
    /// If the same move was already played from here, the existing node is
    /// reused instead of adding a duplicate variation.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    ) -> Result<NodeId, GameError> {
        let status = self.status();
        if !status.is_active() {
            tracing::debug!(%from, %to, %status, "move rejected, game is over");
            return Err(GameError::GameOver(status));
        }

        let position = self.position();
        let requested = match promotion {
            Some(p) => Move::with_promotion(from, to, p),
            None => Move::new(from, to),
        };
        let m = if position.is_promotion(requested) {
            Move::with_promotion(from, to, promotion.unwrap_or(Promotion::Queen))
        } else {
            Move::new(from, to)
        };

        let existing = self
            .node(self.current)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).mov == Some(m));
        if let Some(child) = existing {
            tracing::trace!(mv = %m, node = %child, "move replayed, following existing line");
            self.current = child;
            return Ok(child);
        }

        let next = position.play(m).map_err(|err| {
            tracing::debug!(mv = %m, %err, "illegal move rejected");
            GameError::from(err)
        })?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(GameNode::new(next, Some(m), Some(self.current)));
        self.nodes[self.current.0].children.push(id);
        self.current = id;
        tracing::debug!(mv = %m, node = %id, fen = %self.to_fen(), "move played");

        if tracing::enabled!(tracing::Level::DEBUG) {
            let status = self.status();
            if !status.is_active() {
                tracing::debug!(%status, node = %id, "game reached a terminal state");
            }
        }
        Ok(id)
    }

    /// Plays a move given in square-pair notation (e.g. "e2e4", "e7e8q").
    pub fn play_uci(&mut self, token: &str) -> Result<NodeId, GameError> {
        let m = Move::from_uci(token)?;
        self.play(m.from(), m.to(), m.promotion())
    }

    /// Occurrences of the current position's signature among itself and its
    /// ancestors with the same side to move.
    pub fn repetition_count(&self) -> usize {
        self.repetition_count_at(self.current)
    }

    fn repetition_count_at(&self, id: NodeId) -> usize {
        let target = self.node(id).signature;
        let mut count = 1;
        let mut cursor = self.grandparent(id);
        while let Some(ancestor) = cursor {
            if self.node(ancestor).signature == target {
                count += 1;
            }
            cursor = self.grandparent(ancestor);
        }
        count
    }

    fn grandparent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .parent
            .and_then(|parent| self.node(parent).parent)
    }

    /// Steps back to the parent position. Returns false at the root.
    pub fn back(&mut self) -> bool {
        match self.node(self.current).parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Steps forward along the main line. Returns false at a leaf.
    pub fn forward(&mut self) -> bool {
        match self.node(self.current).children.first() {
            Some(&child) => {
                self.current = child;
                true
            }
            None => false,
        }
    }

    /// Makes `id` the current position.
    ///
    /// `id` must have been issued by this game or the game it was cloned
    /// from; see [`NodeId`].
    pub fn goto(&mut self, id: NodeId) -> Result<(), GameError> {
        self.get(id)?;
        self.current = id;
        Ok(())
    }

    /// Returns the parent of `id`, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Returns the children of `id`, main line first.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Returns the move that led to `id`, or `None` at the root.
    pub fn move_at(&self, id: NodeId) -> Option<Move> {
        self.nodes.get(id.0).and_then(|node| node.mov)
    }

    /// Moves of the main line, from the root following first children.
    pub fn main_line(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = NodeId::ROOT;
        while let Some(&child) = self.node(cursor).children.first() {
            moves.extend(self.node(child).mov);
            cursor = child;
        }
        moves
    }

    /// Moves leading from the root to `id`.
    pub fn line_to(&self, id: NodeId) -> Result<Vec<Move>, GameError> {
        self.get(id)?;
        let mut moves = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            moves.extend(self.node(node).mov);
            cursor = self.node(node).parent;
        }
        moves.reverse();
        Ok(moves)
    }

    fn get(&self, id: NodeId) -> Result<&GameNode, GameError> {
        self.nodes.get(id.0).ok_or(GameError::UnknownNode(id))
    }

    /// Node lookup for handles this game issued itself.
    fn node(&self, id: NodeId) -> &GameNode {
        &self.nodes[id.0]
    }
}
