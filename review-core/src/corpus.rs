//! # Avaliações de Demonstração
//!
//! Avaliações de hotel (em inglês, como no léxico de sentimento) usadas pela interface
//! web e pelos testes. Cada uma traz um alvo sugerido que aparece como token isolado.

use serde::Serialize;

/// Uma avaliação de demonstração com o alvo sugerido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoReview {
    /// Título exibido no seletor da interface.
    pub title: &'static str,
    /// Alvo sugerido para a classificação.
    pub target: &'static str,
    pub text: &'static str,
}

/// Retorna as avaliações de demonstração
pub fn demo_reviews() -> Vec<DemoReview> {
    vec![
        DemoReview {
            title: "Wifi elogiado",
            target: "wifi",
            text: "The room was small. The wifi was fast and reliable. Breakfast was cold.",
        },
        DemoReview {
            title: "Café da manhã",
            target: "breakfast",
            text: "Check-in took forever and the lobby smelled of smoke. The breakfast was cold and the coffee was terrible. At least the bed was comfortable.",
        },
        DemoReview {
            title: "Equipe atenciosa",
            target: "staff",
            text: "We stayed three nights in Oct. for a conference. The staff were friendly and very helpful with directions. Parking was expensive but the location was great.",
        },
        DemoReview {
            title: "Piscina",
            target: "pool",
            text: "The pool was dirty and the towels were never replaced. I loved the pool bar though! Overall a mixed experience.",
        },
        DemoReview {
            title: "Limpeza",
            target: "bathroom",
            text: "The bedroom was spacious and quiet. Sadly the bathroom was not clean, there was hair in the shower. Housekeeping fixed it the next day.",
        },
        DemoReview {
            title: "Vista do quarto",
            target: "view",
            text: "Amazing view of the harbor from the 12th floor!!! The room itself was a bit dated, but the bed was comfortable and the staff were lovely.",
        },
        DemoReview {
            title: "Barulho",
            target: "noise",
            text: "The noise from the street kept us awake until 2 a.m. every night. Dr. Lee at the front desk offered a new room, which was nice.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reviews_not_empty() {
        let demos = demo_reviews();
        assert!(demos.len() >= 5);
        for demo in &demos {
            assert!(!demo.target.trim().is_empty());
            assert!(demo.text.to_lowercase().contains(demo.target));
        }
    }
}
