//! Single-transfer journeys.
//!
//! Stitches two direct segments together through a configured transfer
//! link. Exactly one change is ever attempted; links are not chained.

use tracing::debug;

use crate::domain::{Stop, TransferLink};

use super::segment::RouteSet;

/// A journey with one change of route.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPath {
    /// The full itinerary, boundary stops emitted once.
    pub stops: Vec<Stop>,
    /// The link as travelled: alight at `transfer1`, board at `transfer2`.
    pub via: TransferLink,
    /// Whether the two transfer stops were joined by a walk rather than a
    /// route segment.
    pub walked: bool,
}

/// Find a path from `start` to `end` changing once at a transfer link.
///
/// Links are tried in collection order. For each link the declared
/// orientation (`transfer1` then `transfer2`) is tried before the reverse.
/// The first orientation with both legs resolvable wins.
pub fn find_route_with_transfers(
    routes: &RouteSet,
    transfers: &[TransferLink],
    start: &str,
    end: &str,
) -> Option<TransferPath> {
    for link in transfers {
        for (alight, board) in link.orientations() {
            let Some(leg1) = routes.find_direct(start, alight) else {
                continue;
            };
            let Some(leg2) = routes.find_direct(board, end) else {
                continue;
            };

            let connector = routes.find_direct(alight, board);
            let walked = connector.is_none();
            let mut stops = leg1.stops;

            match connector {
                Some(segment) => stops.extend(segment.stops.into_iter().skip(1)),
                None => {
                    // Walk between the transfer stops, unless both legs
                    // already meet at the same stop.
                    if stops.last().map(Stop::coord_key) != Some(leg2.first().coord_key()) {
                        stops.push(leg2.first().clone());
                    }
                }
            }
            stops.extend(leg2.stops.into_iter().skip(1));

            debug!(
                start,
                end,
                alight,
                board,
                walked,
                stops = stops.len(),
                "resolved transfer path"
            );

            return Some(TransferPath {
                stops,
                via: TransferLink::new(alight, board),
                walked,
            });
        }
    }

    None
}
