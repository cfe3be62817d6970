use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::{SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::engine::positions::next_dealer;
use crate::engine::RandomSource;

/// Дилер: карты и кнопка. Движок зовёт его в точках перехода улиц.
pub trait Dealer {
    /// Новая перемешанная колода перед раздачей.
    fn shuffle_up(&mut self);

    /// По две карманные карты, по одной за круг, в порядке `order`.
    fn deal_hole_cards(&mut self, table: &mut Table, order: &[SeatIndex]) -> Result<(), EngineError>;

    /// Сжечь одну карту и открыть карты улицы (3 на флопе, 1 на тёрне/ривере).
    /// Карты добавляются на борд стола и возвращаются.
    fn deal_community(&mut self, table: &mut Table, street: Street) -> Result<Vec<Card>, EngineError>;

    /// Передвинуть кнопку к следующему игроку с фишками.
    fn rotate_button(&mut self, table: &mut Table) -> Option<SeatIndex>;
}

/// Дилер на обычной 52-карточной колоде со своим RNG.
#[derive(Clone, Debug)]
pub struct DeckDealer<R: RandomSource> {
    rng: R,
    deck: Deck,
}

impl<R: RandomSource> DeckDealer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            deck: Deck::standard_52(),
        }
    }

    /// Сколько карт осталось в колоде.
    pub fn remaining(&self) -> usize {
        self.deck.len()
    }

    fn draw(&mut self) -> Result<Card, EngineError> {
        self.deck
            .draw_one()
            .ok_or(EngineError::Internal("колода закончилась"))
    }
}

impl<R: RandomSource> Dealer for DeckDealer<R> {
    fn shuffle_up(&mut self) {
        self.deck = Deck::standard_52();
        self.rng.shuffle(&mut self.deck.cards);
    }

    fn deal_hole_cards(&mut self, table: &mut Table, order: &[SeatIndex]) -> Result<(), EngineError> {
        for _round in 0..2 {
            for &seat in order {
                let card = self.draw()?;
                if let Some(p) = table.player_mut(seat) {
                    p.hole_cards.push(card);
                }
            }
        }
        Ok(())
    }

    fn deal_community(&mut self, table: &mut Table, street: Street) -> Result<Vec<Card>, EngineError> {
        let count = street.community_cards();
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.deck.len() < count + 1 {
            return Err(EngineError::Internal("колода закончилась"));
        }
        self.deck.burn();
        let cards = self.deck.draw_n(count);
        table.board.extend_from_slice(&cards);
        Ok(cards)
    }

    fn rotate_button(&mut self, table: &mut Table) -> Option<SeatIndex> {
        let button = next_dealer(table)?;
        table.dealer_button = Some(button);
        Some(button)
    }
}
