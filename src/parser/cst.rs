//! Concrete syntax tree recording.
//!
//! When trivia capture is enabled every token the parser pulls is appended
//! to the innermost open frame, and each production closes its frame with
//! the entity it built. Flattening the tree in push order gives back the
//! exact source text.

use crate::{ast::ast::Entity, lexer::tokens::Token};

#[derive(Debug, Clone)]
pub enum CstNode {
    Token(Token),
    Frame(CstFrame),
}

#[derive(Debug, Clone, Default)]
pub struct CstFrame {
    nodes: Vec<CstNode>,
    entity: Option<Entity>,
}

impl CstFrame {
    pub fn nodes(&self) -> &[CstNode] {
        &self.nodes
    }

    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    pub fn children(&self) -> impl Iterator<Item = &CstFrame> {
        self.nodes.iter().filter_map(|node| match node {
            CstNode::Frame(frame) => Some(frame),
            CstNode::Token(_) => None,
        })
    }

    /// Every token covered by this frame, nested frames included, in the
    /// order the parser pulled them.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![];
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for node in &self.nodes {
            match node {
                CstNode::Token(token) => out.push(token),
                CstNode::Frame(frame) => frame.collect_tokens(out),
            }
        }
    }

    pub fn to_source(&self) -> String {
        self.tokens().iter().map(|token| token.value.as_str()).collect()
    }
}

/// Stack of open frames; the bottom frame is the root and is never popped by
/// `close`.
#[derive(Debug)]
pub struct CstStack {
    frames: Vec<CstFrame>,
    enabled: bool,
}

impl CstStack {
    pub fn new(enabled: bool) -> Self {
        CstStack {
            frames: vec![CstFrame::default()],
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn top(&mut self) -> &mut CstFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn record(&mut self, token: Token) {
        if self.enabled {
            self.top().nodes.push(CstNode::Token(token));
        }
    }

    /// Pushes a frame. With `hand_over`, the most recently recorded token
    /// (the lookahead that starts the new construct) moves into it.
    pub fn open(&mut self, hand_over: bool) {
        if !self.enabled {
            return;
        }

        let mut child = CstFrame::default();
        let parent = self.top();
        if hand_over && matches!(parent.nodes.last(), Some(CstNode::Token(_))) {
            if let Some(token) = parent.nodes.pop() {
                child.nodes.push(token);
            }
        }
        self.frames.push(child);
    }

    /// Pops the current frame and attaches `entity`. With `hand_back`, the
    /// frame's last recorded token (a lookahead belonging to whatever
    /// follows) moves back to the parent, after the closed frame.
    pub fn close(&mut self, entity: Option<Entity>, hand_back: bool) {
        if !self.enabled || self.frames.len() < 2 {
            return;
        }

        let Some(mut child) = self.frames.pop() else {
            return;
        };
        child.entity = entity;

        let returned = if hand_back && matches!(child.nodes.last(), Some(CstNode::Token(_))) {
            child.nodes.pop()
        } else {
            None
        };

        let parent = self.top();
        parent.nodes.push(CstNode::Frame(child));
        parent.nodes.extend(returned);
    }

    /// Closes any frames left open and returns the root.
    pub fn finish(mut self, entity: Option<Entity>) -> Option<CstFrame> {
        if !self.enabled {
            return None;
        }

        while self.frames.len() > 1 {
            self.close(None, false);
        }
        let mut root = self.frames.pop()?;
        root.entity = entity;
        Some(root)
    }
}
