//! Generation counter that keeps only the latest request of an engine alive.
//!
//! Every fetch takes a [`Ticket`] under the engine's state lock. Issuing a new
//! ticket cancels the previous one, and a response may only be applied while
//! its ticket is still current.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct RequestGate {
    generation: u64,
    in_flight: Option<CancellationToken>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl RequestGate {
    /// Cancels the in-flight request, if any, and hands out a fresh ticket.
    pub fn issue(&mut self) -> Ticket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        Ticket {
            generation: self.generation,
            token,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation && !ticket.token.is_cancelled()
    }

    /// Marks the ticket's request as settled. Returns `false` for stale
    /// tickets, whose responses must be dropped.
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Cancels whatever is in flight without issuing a new ticket.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.generation += 1;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl Ticket {
    /// Drives `fut` until it finishes or the ticket is cancelled.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => Some(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_invalidates_older() {
        let mut gate = RequestGate::default();
        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.is_current(&first));
        assert!(gate.is_current(&second));
        assert!(!gate.settle(&first));
        assert!(gate.settle(&second));
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn cancelled_ticket_stops_its_future() {
        let mut gate = RequestGate::default();
        let ticket = gate.issue();
        gate.cancel();

        let output = ticket.run(std::future::pending::<()>()).await;
        assert!(output.is_none());
    }

    #[tokio::test]
    async fn current_ticket_yields_output() {
        let mut gate = RequestGate::default();
        let ticket = gate.issue();

        assert_eq!(ticket.run(async { 7 }).await, Some(7));
    }
}
