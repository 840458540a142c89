//! The order flow driver.

use std::sync::Arc;

use tracing::{error, info, warn};

use bracket_core::{ActionId, OrderSnapshot, Price, TradeIntent};
use bracket_retry::{retry_until, RetryPolicy};
use bracket_surface::{
    click_with_fallback, scrape_orders, ElementValidator, PageSurface, SelectorSet,
};

use crate::bracket::parse_price_text;
use crate::error::{ExecError, Result};
use crate::outcome::{confirm_submission, diff_order_state, ActionReport};
use crate::ticket::fill_ticket;

/// Drives one trading panel through place/cancel/flatten actions.
///
/// Every action follows the same shape: snapshot the tables, interact,
/// then poll fresh snapshots until the outcome heuristic sees a change or
/// the poll budget runs out. Snapshots are always re-scraped; nothing
/// read from the page is trusted across an await.
pub struct OrderFlow {
    surface: Arc<dyn PageSurface>,
    validator: Arc<dyn ElementValidator>,
    selectors: SelectorSet,
    element_wait: RetryPolicy,
    confirm_poll: RetryPolicy,
}

impl OrderFlow {
    pub fn new(
        surface: Arc<dyn PageSurface>,
        validator: Arc<dyn ElementValidator>,
        selectors: SelectorSet,
        element_wait: RetryPolicy,
        confirm_poll: RetryPolicy,
    ) -> Self {
        Self {
            surface,
            validator,
            selectors,
            element_wait,
            confirm_poll,
        }
    }

    /// Last traded price from the quote cell.
    ///
    /// Used as the anchor for market-order bracket legs.
    pub fn last_price(&self) -> Result<Price> {
        let text = self.surface.read_text(&self.selectors.last_price)?;
        parse_price_text(&text)
    }

    /// Current reading of the order and position tables.
    pub fn snapshot(&self) -> Result<OrderSnapshot> {
        Ok(scrape_orders(self.surface.as_ref(), &self.selectors)?)
    }

    /// Fill the ticket and submit one bracket order.
    pub async fn place_bracket(&self, intent: &TradeIntent) -> Result<ActionReport> {
        intent.validate()?;
        let action_id = ActionId::new();
        info!(
            action = %action_id,
            symbol = intent.symbol.as_str(),
            side = %intent.action,
            qty = intent.quantity,
            order_type = %intent.order_type,
            stop_loss = %intent.stop_loss,
            take_profit = %intent.take_profit,
            "placing bracket order"
        );

        let before = self.snapshot()?;

        fill_ticket(
            self.surface.as_ref(),
            self.validator.as_ref(),
            &self.selectors,
            self.element_wait,
            intent,
        )
        .await?;

        click_with_fallback(
            self.surface.as_ref(),
            self.validator.as_ref(),
            &self.selectors.submit_buttons,
        )?;

        let report = self.await_outcome(&before, confirm_submission).await?;
        log_report(&action_id, "place", &report);
        Ok(report)
    }

    /// Cancel every working order.
    pub async fn cancel_all(&self) -> Result<ActionReport> {
        let action_id = ActionId::new();
        let before = self.snapshot()?;

        if before.orders.is_empty() {
            info!(action = %action_id, "no orders visible, nothing to cancel");
            let mut report = ActionReport::default();
            report.warnings.push("no orders visible to cancel".into());
            return Ok(report);
        }

        info!(action = %action_id, orders = before.orders.len(), "cancelling all orders");
        click_with_fallback(
            self.surface.as_ref(),
            self.validator.as_ref(),
            &self.selectors.cancel_all_buttons,
        )?;

        let report = self.await_outcome(&before, diff_order_state).await?;
        log_report(&action_id, "cancel-all", &report);
        Ok(report)
    }

    /// Exit every open position at market (and cancel the attached legs).
    pub async fn flatten_all(&self) -> Result<ActionReport> {
        let action_id = ActionId::new();
        let before = self.snapshot()?;

        if before.open_position_count() == 0 {
            info!(action = %action_id, "no open positions, nothing to flatten");
            let mut report = ActionReport::default();
            report.warnings.push("no open positions to flatten".into());
            return Ok(report);
        }

        info!(
            action = %action_id,
            positions = before.open_position_count(),
            "flattening all positions"
        );
        click_with_fallback(
            self.surface.as_ref(),
            self.validator.as_ref(),
            &self.selectors.exit_all_buttons,
        )?;

        let report = self.await_outcome(&before, diff_order_state).await?;
        log_report(&action_id, "flatten", &report);
        Ok(report)
    }

    /// Poll fresh snapshots until `judge` reports success or the poll
    /// budget runs out; the final snapshot's report is returned either
    /// way, so an exhausted poll surfaces as an ambiguous report rather
    /// than an error.
    async fn await_outcome<F>(&self, before: &OrderSnapshot, judge: F) -> Result<ActionReport>
    where
        F: Fn(&OrderSnapshot, &OrderSnapshot) -> ActionReport,
    {
        let surface = self.surface.as_ref();
        let selectors = &self.selectors;

        let outcome = retry_until(
            self.confirm_poll,
            move || async move { scrape_orders(surface, selectors) },
            |scrape| matches!(scrape, Ok(after) if judge(before, after).success),
        )
        .await;

        match outcome {
            Ok(Ok(after)) => Ok(judge(before, &after)),
            Ok(Err(err)) => Err(err.into()),
            Err(retry_err) => {
                let attempts = retry_err.attempts();
                match retry_err.into_last() {
                    Some(Ok(after)) => Ok(judge(before, &after)),
                    Some(Err(err)) => Err(err.into()),
                    None => Err(ExecError::RetryExhausted {
                        what: "table confirmation".into(),
                        attempts,
                    }),
                }
            }
        }
    }
}

fn log_report(action_id: &ActionId, what: &str, report: &ActionReport) {
    if report.success {
        info!(
            action = %action_id,
            changes = report.changes.join("; "),
            "{what} confirmed"
        );
    } else if !report.errors.is_empty() {
        error!(
            action = %action_id,
            errors = report.errors.join("; "),
            "{what} contradicted by the tables"
        );
    } else {
        warn!(
            action = %action_id,
            warnings = report.warnings.join("; "),
            "{what} outcome ambiguous"
        );
    }
}
