//! Order ticket filling.

use tracing::debug;

use bracket_core::TradeIntent;
use bracket_retry::RetryPolicy;
use bracket_surface::{
    click_with_fallback, wait_for_element, ElementValidator, PageSurface, SelectorSet,
};

use crate::error::Result;

/// Fill the order ticket for one intent.
///
/// Each input is waited for before it is written: the ticket widget
/// renders its fields lazily and writing into a not-yet-mounted input is
/// silently lost. The side button is clicked last, after every field
/// holds its value.
pub async fn fill_ticket(
    surface: &dyn PageSurface,
    validator: &dyn ElementValidator,
    selectors: &SelectorSet,
    wait: RetryPolicy,
    intent: &TradeIntent,
) -> Result<()> {
    wait_for_element(surface, &selectors.symbol_input, wait).await?;
    surface.set_value(&selectors.symbol_input, &intent.symbol)?;

    wait_for_element(surface, &selectors.quantity_input, wait).await?;
    surface.set_value(&selectors.quantity_input, &intent.quantity.to_string())?;

    if let Some(entry) = intent.entry_price {
        wait_for_element(surface, &selectors.price_input, wait).await?;
        surface.set_value(&selectors.price_input, &entry.to_string())?;
    }

    let side_buttons = match intent.action {
        bracket_core::TradeAction::Buy => &selectors.buy_buttons,
        bracket_core::TradeAction::Sell => &selectors.sell_buttons,
    };
    let clicked = click_with_fallback(surface, validator, side_buttons)?;

    debug!(
        symbol = intent.symbol.as_str(),
        side = %intent.action,
        qty = intent.quantity,
        side_button = clicked,
        "ticket filled"
    );
    Ok(())
}
