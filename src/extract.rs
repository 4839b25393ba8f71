//! Extract closed positions from a saved OptionAlpha bot positions page.
//!
//! The page layout is fixed: one `#bots-bot-positions-closedpos` panel, one
//! `bd.dim-scroller` scroll body inside it, one `row.pos` per position. Every
//! lookup is an explicit existence check so a markup change (or a half-saved
//! page) fails loudly with the row and selector that broke, instead of
//! silently producing a short or shifted table.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::config::ParseOptions;
use crate::fees::estimate_fees;
use crate::types::{PositionStatus, TradeRecord};
use crate::utils::parse_money;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("closed positions panel not found (#bots-bot-positions-closedpos)")]
    PanelMissing,
    #[error("closed positions panel has no scroll body (bd.dim-scroller)")]
    ScrollBodyMissing,
    #[error("row {row}: missing `{path}`")]
    ElementMissing { row: usize, path: &'static str },
    #[error("row {row}: `{path}` has no text")]
    TextMissing { row: usize, path: &'static str },
    #[error("row {row}: {field} is not a number: {text:?}")]
    BadNumber {
        row: usize,
        field: &'static str,
        text: String,
    },
}

/// Pre-parsed CSS selectors. The patterns are fixed strings, so a parse
/// failure is a programming error, same contract as a hand-written regex.
struct Selectors {
    title: Selector,
    edit_title: Selector,
    panel: Selector,
    scroll_body: Selector,
    row: Selector,
    symbol_block: Selector,
    sym: Selector,
    exp: Selector,
    strat: Selector,
    postext: Selector,
    close_date_block: Selector,
    div: Selector,
    desc: Selector,
    quantity_block: Selector,
    cost_block: Selector,
    pnl_block: Selector,
}

impl Selectors {
    fn new() -> Self {
        let sel = |s: &str| Selector::parse(s).unwrap();
        Self {
            title: sel("h1.title"),
            edit_title: sel("a.edit-title"),
            panel: sel("#bots-bot-positions-closedpos"),
            scroll_body: sel("bd.dim-scroller"),
            row: sel("row.pos"),
            symbol_block: sel("div.symbol"),
            sym: sel("span.sym"),
            exp: sel("span.exp"),
            strat: sel("span.strat"),
            postext: sel("span.postext"),
            close_date_block: sel("div.closeDate"),
            div: sel("div"),
            desc: sel("desc"),
            quantity_block: sel("div.quantity"),
            cost_block: sel("div.cost"),
            pnl_block: sel("div.pnl"),
        }
    }
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub struct PositionExtractor {
    opts: ParseOptions,
    sel: Selectors,
}

impl PositionExtractor {
    pub fn new(opts: ParseOptions) -> Self {
        Self {
            opts,
            sel: Selectors::new(),
        }
    }

    /// Parse the whole page into numbered trade records, in document order.
    pub fn extract(&self, html: &str) -> Result<Vec<TradeRecord>, ExtractError> {
        let doc = Html::parse_document(html);
        let bot = self.bot_name(&doc);

        let panel = doc
            .select(&self.sel.panel)
            .next()
            .ok_or(ExtractError::PanelMissing)?;
        let body = panel
            .select(&self.sel.scroll_body)
            .next()
            .ok_or(ExtractError::ScrollBodyMissing)?;

        let mut records = Vec::new();
        let mut trade_no = 1u32;
        for (idx, row) in body.select(&self.sel.row).enumerate() {
            if let Some(rec) = self.extract_row(idx + 1, row, &bot, trade_no)? {
                records.push(rec);
                trade_no += 1;
            }
        }
        debug!(rows = records.len(), bot = %bot, "extracted closed positions");
        Ok(records)
    }

    /// Bot name lives in the edit link of the SECOND page title. A page
    /// saved mid-load can miss it; that is never fatal.
    fn bot_name(&self, doc: &Html) -> String {
        let titles: Vec<_> = doc.select(&self.sel.title).collect();
        if titles.len() != 2 {
            return String::new();
        }
        titles[1]
            .select(&self.sel.edit_title)
            .next()
            .map(text_of)
            .unwrap_or_default()
    }

    fn extract_row(
        &self,
        row_no: usize,
        row: ElementRef,
        bot: &str,
        trade_no: u32,
    ) -> Result<Option<TradeRecord>, ExtractError> {
        let symdiv = self.require(row_no, row, &self.sel.symbol_block, "div.symbol")?;
        let symbol = self.text(row_no, symdiv, &self.sel.sym, "div.symbol span.sym")?;
        let expiration = self.text(row_no, symdiv, &self.sel.exp, "div.symbol span.exp")?;
        let strategy = self.text(row_no, symdiv, &self.sel.strat, "div.symbol span.strat")?;
        let position_text =
            self.text(row_no, symdiv, &self.sel.postext, "div.symbol span.postext")?;

        let closediv = self.require(row_no, row, &self.sel.close_date_block, "div.closeDate")?;
        let status_label = self.text(row_no, closediv, &self.sel.div, "div.closeDate div")?;
        let close_date = self.text(row_no, closediv, &self.sel.desc, "div.closeDate desc")?;
        let status = PositionStatus::classify(&status_label);

        if status.is_canceled() && !self.opts.include_canceled {
            // skipped entirely; the trade counter does not move
            return Ok(None);
        }

        let qtydiv = self.require(row_no, row, &self.sel.quantity_block, "div.quantity")?;
        let quantity = self.number(row_no, "qty", &self.own_text(row_no, qtydiv, "div.quantity")?)?;

        let costdiv = self.require(row_no, row, &self.sel.cost_block, "div.cost")?;
        let cost_text = self.text(row_no, costdiv, &self.sel.div, "div.cost div")?;
        let cost = self.number(row_no, "cost", &cost_text)?;
        let cost_desc = self.text(row_no, costdiv, &self.sel.desc, "div.cost desc")?;

        let pnldiv = self.require(row_no, row, &self.sel.pnl_block, "div.pnl")?;
        let mut pnl = self.number(row_no, "pnl", &self.own_text(row_no, pnldiv, "div.pnl")?)?;

        let mut fees = estimate_fees(&strategy, &status, quantity, self.opts.fee_per_contract());
        if status.is_canceled() {
            // canceled positions never traded; keep them as zero-PnL markers
            pnl = 0.0;
            fees = 0.0;
        }
        let net_pnl = pnl + fees;

        Ok(Some(TradeRecord {
            trade_no,
            bot: bot.to_string(),
            symbol,
            expiration,
            strategy,
            position_text,
            status,
            close_date,
            quantity,
            cost,
            cost_desc,
            pnl,
            fees,
            net_pnl,
        }))
    }

    /// Structural lookup: missing elements abort in both modes.
    fn require<'a>(
        &self,
        row: usize,
        scope: ElementRef<'a>,
        sel: &Selector,
        path: &'static str,
    ) -> Result<ElementRef<'a>, ExtractError> {
        scope
            .select(sel)
            .next()
            .ok_or(ExtractError::ElementMissing { row, path })
    }

    /// Text of a required sub-element. Empty text aborts unless lenient.
    fn text(
        &self,
        row: usize,
        scope: ElementRef,
        sel: &Selector,
        path: &'static str,
    ) -> Result<String, ExtractError> {
        let el = self.require(row, scope, sel, path)?;
        self.checked_text(row, el, path)
    }

    /// Text of an already-located element (quantity/pnl carry their value
    /// directly, not in a sub-element).
    fn own_text(
        &self,
        row: usize,
        el: ElementRef,
        path: &'static str,
    ) -> Result<String, ExtractError> {
        self.checked_text(row, el, path)
    }

    fn checked_text(
        &self,
        row: usize,
        el: ElementRef,
        path: &'static str,
    ) -> Result<String, ExtractError> {
        let t = text_of(el);
        if t.is_empty() && !self.opts.lenient {
            return Err(ExtractError::TextMissing { row, path });
        }
        Ok(t)
    }

    fn number(&self, row: usize, field: &'static str, text: &str) -> Result<f64, ExtractError> {
        match parse_money(text) {
            Some(v) => Ok(v),
            None if self.opts.lenient => Ok(0.0),
            None => Err(ExtractError::BadNumber {
                row,
                field,
                text: text.to_string(),
            }),
        }
    }
}
