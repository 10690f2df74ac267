//! Metric declarations.
//!
//! ```text
//! decl := "hidden"? kind IDENT ("by" key ("," key)*)? ("as" STRING)?
//!         ("buckets" number ("," number)*)?
//! kind := "counter" | "gauge" | "timer" | "text" | "histogram"
//! key  := IDENT | STRING
//! ```

use tally_diagnostic::{ErrorCode, ErrorGuaranteed};
use tally_ir::{MetricDecl, Position, TokenKind};
use tally_metrics::{MetricDef, MetricKind};
use tracing::debug;

use crate::cursor::TokenValue;
use crate::symbol_table::SymbolKind;
use crate::Parser;

fn metric_kind(kind: TokenKind) -> Option<MetricKind> {
    match kind {
        TokenKind::Counter => Some(MetricKind::Counter),
        TokenKind::Gauge => Some(MetricKind::Gauge),
        TokenKind::Timer => Some(MetricKind::Timer),
        TokenKind::Text => Some(MetricKind::Text),
        TokenKind::Histogram => Some(MetricKind::Histogram),
        _ => None,
    }
}

impl Parser<'_> {
    pub(super) fn parse_decl(&mut self) -> Result<MetricDecl, ErrorGuaranteed> {
        let hidden = self.eat(TokenKind::Hidden);
        let Some(kind) = metric_kind(self.current_kind()) else {
            return Err(self.syntax_error("metric kind"));
        };
        self.bump();
        let (name, name_pos) = self.expect_ident()?;

        let mut keys = Vec::new();
        if self.eat(TokenKind::By) {
            loop {
                keys.push(self.parse_key()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let exported_name = if self.eat(TokenKind::As) {
            Some(self.expect(TokenKind::String)?.text)
        } else {
            None
        };

        let mut buckets = Vec::new();
        if self.eat(TokenKind::Buckets) {
            loop {
                buckets.push(self.parse_bucket()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let decl = MetricDecl {
            name,
            kind,
            keys,
            hidden,
            exported_name,
            buckets,
        };
        self.declare_metric(&decl, name_pos);
        Ok(decl)
    }

    fn parse_key(&mut self) -> Result<String, ErrorGuaranteed> {
        match self.current_kind() {
            TokenKind::Ident | TokenKind::String => Ok(self.bump().0.text),
            _ => Err(self.syntax_error("dimension key")),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn parse_bucket(&mut self) -> Result<f64, ErrorGuaranteed> {
        let negative = self.eat(TokenKind::Minus);
        let value = match self.current_kind() {
            TokenKind::Int | TokenKind::Float => match self.bump().1 {
                TokenValue::Int(value) => value as f64,
                TokenValue::Float(value) => value,
                TokenValue::Text => 0.0,
            },
            _ => return Err(self.syntax_error("bucket boundary")),
        };
        Ok(if negative { -value } else { value })
    }

    /// Declare the metric in the current scope and register it.
    ///
    /// A duplicate in the same scope is reported and the registry is left
    /// alone. A registry conflict is reported, but the name stays declared
    /// so later references to it do not cascade.
    fn declare_metric(&mut self, decl: &MetricDecl, pos: Position) {
        let symbol = match self.symtab.declare(&decl.name, SymbolKind::Metric, pos.clone()) {
            Ok(symbol) => symbol,
            Err(dup) => {
                self.errors.add_with_code(pos, ErrorCode::E2001, dup.to_string());
                return;
            }
        };

        let mut def = MetricDef::new(&decl.name, decl.kind)
            .with_program(&*self.name)
            .with_keys(decl.keys.iter().cloned())
            .hidden(decl.hidden)
            .with_buckets(decl.buckets.clone());
        if let Some(exported) = &decl.exported_name {
            def = def.with_exported_name(exported.as_str());
        }

        let reused = self.config.traces_events() && self.metrics.lookup(&decl.name).is_some();
        match self.metrics.register(def) {
            Ok(handle) => {
                if self.config.traces_events() {
                    debug!(name = handle.name(), kind = %handle.kind(), reused, "declared metric");
                }
                symbol.metric = Some(handle);
            }
            Err(err) => {
                self.errors.add_with_code(pos, ErrorCode::E2004, err.to_string());
            }
        }
    }
}
