//! Seed data for a fresh backend. Field variety comes from index arithmetic,
//! so two seeds taken at the same instant differ only in random identifiers.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::money::{cents, Money};
use crate::domain::{
    ledger, Alert, Contact, ContactMethod, DepositStatus, Goal, GoalKind, Invite, InviteChannel,
    InviteStatus, Invitee, KycTier, LedgerEntry, LedgerKind, Payout, PayoutMethod, PayoutStatus,
    Player, PlayerFiatDeposit, PlayerStatus, Severity, Statement, StatementStatus, TimelineEntry,
    WalletSummary, War, WarStatus,
};
use crate::ids;

pub const DEFAULT_PLAYER_COUNT: usize = 55;

const FIRST_NAMES: [&str; 30] = [
    "Adeel", "Hassan", "Zara", "Hira", "Ali", "Saad", "Mariam", "Usman", "Ayesha", "Bilal",
    "Fatima", "Omar", "Sana", "Khalid", "Layla", "Yusuf", "Nadia", "Ibrahim", "Amina", "Tariq",
    "Sara", "Rashid", "Leila", "Hamza", "Zainab", "Faisal", "Noor", "Asad", "Hana", "Jamil",
];

/// Player fiat deposits and the USDT (in cents) they converted to.
const CONVERSIONS: [(&str, &str, i64); 10] = [
    ("player1010", "5,000 PKR", 1_800),
    ("player1015", "2,500 AED", 68_000),
    ("player1022", "100 GBP", 12_700),
    ("player1008", "15,000 PKR", 5_400),
    ("player1033", "200 USD", 20_000),
    ("player1019", "8,000 INR", 9_600),
    ("player1041", "500 AED", 13_600),
    ("player1003", "3,000 PKR", 1_080),
    ("player1027", "50 GBP", 6_350),
    ("player1038", "1,200 AED", 32_700),
];

fn hours_ago(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    now - Duration::hours(hours)
}

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub fn players(count: usize, now: DateTime<Utc>) -> Vec<Player> {
    const TIERS: [KycTier; 3] = [KycTier::A, KycTier::B, KycTier::C];
    const STATUSES: [PlayerStatus; 4] = [
        PlayerStatus::Active,
        PlayerStatus::Active,
        PlayerStatus::Suspended,
        PlayerStatus::Restricted,
    ];

    (0..count)
        .map(|i| {
            let n = i as i64;
            Player {
                id: format!("pl_{}", 1000 + i),
                name: format!("{} {}", FIRST_NAMES[i % FIRST_NAMES.len()], i + 1),
                username: format!("player{}", i + 1),
                kyc_tier: TIERS[i % TIERS.len()],
                status: STATUSES[i % STATUSES.len()],
                risk_score: ((i * 7) % 98) as u8,
                last_active: hours_ago(now, (n * 2) % 72),
                balance_available: Money::from(150 + (n * 37) % 2200),
                balance_pending: if i % 7 == 0 {
                    Money::from(50 + (n % 5) * 30)
                } else {
                    Money::ZERO
                },
                balance_locked: if i % 11 == 0 {
                    Money::from(80 + (n % 4) * 60)
                } else {
                    Money::ZERO
                },
                last_status_change_reason: None,
                last_status_changed_at: None,
                last_status_changed_by: None,
            }
        })
        .collect()
}

pub fn wallet() -> WalletSummary {
    WalletSummary::new(cents(1_245_025), cents(98_000))
}

fn ledger_entry(
    at: DateTime<Utc>,
    kind: LedgerKind,
    description: String,
    amount: Money,
    provisional: Money,
    ref_id: &str,
) -> LedgerEntry {
    LedgerEntry {
        id: ids::prefixed("led", 7),
        at,
        kind,
        description,
        amount,
        balance_after: Some(provisional),
        ref_id: ref_id.to_string(),
    }
}

/// Builds the ledger history and reconciles it against the seeded wallet total.
pub fn ledger(now: DateTime<Utc>) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(CONVERSIONS.len() + 8);
    let mut balance = Money::from(11_800);

    for (i, (player, fiat, usdt)) in CONVERSIONS.iter().enumerate() {
        let usdt = cents(*usdt);
        balance -= usdt;
        entries.push(ledger_entry(
            hours_ago(now, 4 + i as i64 * 8),
            LedgerKind::PlayerDepositConversion,
            format!("Player Deposit Conversion: {player} – {fiat} → {usdt:.2} USDT"),
            -usdt,
            balance,
            &ids::prefixed("ref_dep", 6),
        ));
    }

    let fixed = [
        (hours_ago(now, 12), LedgerKind::AgentDeposit, "Agent Deposit (USDT TRC-20) – 500.00 USDT", cents(50_000), cents(1_343_025), "tx_mwf2ayeh"),
        (hours_ago(now, 36), LedgerKind::AgentDeposit, "Agent Deposit (USDT TRC-20) – 1,000.00 USDT", cents(100_000), cents(1_293_025), "tx_k8j2bxfi"),
        (days_ago(now, 1), LedgerKind::CommissionCredit, "Weekly Commission Credit – Statement Wk 02", cents(34_650), cents(1_193_025), "stmt_02"),
        (days_ago(now, 8), LedgerKind::CommissionCredit, "Weekly Commission Credit – Statement Wk 01", cents(29_820), cents(1_093_025), "stmt_01"),
        (days_ago(now, 2), LedgerKind::WarEntryLock, "War Entry Lock – Clan War #CW-12", cents(-5_000), cents(1_060_970), "war_12"),
        (days_ago(now, 10), LedgerKind::WarEntryRelease, "War Entry Release – Clan War #CW-11 (Settled)", cents(5_000), cents(1_065_970), "war_11"),
        (days_ago(now, 3), LedgerKind::BonusPoolCofund, "Clan Goals – Bonus pool co-fund 100 USDT", cents(-10_000), cents(1_055_970), "cofund_01"),
        (days_ago(now, 5), LedgerKind::CreditReclaim, "Credit Reclaim – pl_1022 eligible locked balance released", cents(8_500), cents(1_064_470), "reclaim_01"),
    ];
    for (at, kind, description, amount, provisional, ref_id) in fixed {
        entries.push(ledger_entry(at, kind, description.to_string(), amount, provisional, ref_id));
    }

    ledger::reconcile(&mut entries, wallet().total);
    entries
}

pub fn invites(now: DateTime<Utc>) -> Vec<Invite> {
    const CHANNELS: [InviteChannel; 5] = [
        InviteChannel::WhatsApp,
        InviteChannel::Telegram,
        InviteChannel::Email,
        InviteChannel::Sms,
        InviteChannel::Copy,
    ];
    const STATUSES: [InviteStatus; 6] = [
        InviteStatus::Pending,
        InviteStatus::Pending,
        InviteStatus::Accepted,
        InviteStatus::Accepted,
        InviteStatus::Failed,
        InviteStatus::Expired,
    ];
    const LABELS: [&str; 12] = [
        "VIP Referral", "Q1 Campaign", "Partner Link", "Community", "Support", "inv_03 Copy",
        "inv_03 Telegram", "inv_03 Whatsapp", "Beta Tester", "Influencer", "Event 2026",
        "Regional PK",
    ];

    let mut invites: Vec<Invite> = (0..14)
        .map(|i| {
            let created = days_ago(now, (i % 14) as i64);
            let status = STATUSES[i % STATUSES.len()];
            Invite {
                id: format!("inv_{:02}", i + 1),
                label: Some(LABELS[i % LABELS.len()].to_string()),
                channel: CHANNELS[i % CHANNELS.len()],
                status,
                created_at: created,
                expires_at: created + Duration::days(if i % 3 == 0 { 7 } else { 3 }),
                accepted_by_player_id: (status == InviteStatus::Accepted)
                    .then(|| format!("pl_{}", 1005 + i)),
                link: ids::invite_link(),
                invitee: None,
            }
        })
        .collect();

    let named = [
        (
            "invitation_01", "Ali", "Khan", 2, InviteStatus::Pending, "INV-8K3D-2P9Q-M4N7",
            vec![(ContactMethod::Email, "ali@example.com"), (ContactMethod::WhatsApp, "+923001234567")],
        ),
        (
            "invitation_02", "Sara", "Ahmed", 5, InviteStatus::Accepted, "INV-A1B2-C3D4-E5F6",
            vec![(ContactMethod::Phone, "+971501234567")],
        ),
        (
            "invitation_03", "Omar", "Hassan", 1, InviteStatus::Pending, "INV-X7Y2-Z9W4-K3R8",
            vec![(ContactMethod::Telegram, "@omar_dev"), (ContactMethod::Email, "omar@test.com")],
        ),
    ];
    for (id, first, last, age_days, status, code, contacts) in named {
        let created = days_ago(now, age_days);
        let contacts: Vec<Contact> = contacts
            .into_iter()
            .map(|(method, value)| Contact {
                method,
                value: value.to_string(),
            })
            .collect();
        invites.push(Invite {
            id: id.to_string(),
            label: Some(format!("{first} {last}")),
            channel: contacts[0].method.into(),
            status,
            created_at: created,
            expires_at: created + Duration::days(7),
            accepted_by_player_id: None,
            link: ids::invite_link(),
            invitee: Some(Invitee {
                first_name: first.to_string(),
                last_name: last.to_string(),
                contacts,
                invitation_code: code.to_string(),
            }),
        });
    }

    invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    invites
}

/// Three pending requests (`po_2001`..`po_2003`) plus eight already decided.
pub fn payouts(players: &[Player], now: DateTime<Utc>) -> Vec<Payout> {
    if players.is_empty() {
        return Vec::new();
    }
    let mut payouts = Vec::with_capacity(11);
    let requested_base = hours_ago(now, 2);

    let pending = [
        ("po_2001", cents(12_550), PayoutMethod::Crypto, "8F2A"),
        ("po_2002", cents(8_800), PayoutMethod::Crypto, "1A7C"),
        ("po_2003", cents(25_000), PayoutMethod::Fiat, "1122"),
    ];
    for (i, (id, amount, method, suffix)) in pending.into_iter().enumerate() {
        let player = &players[i % players.len()];
        let requested_at = requested_base - Duration::minutes(i as i64 * 15);
        payouts.push(Payout {
            id: id.to_string(),
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            amount,
            method,
            status: PayoutStatus::Pending,
            requested_at,
            destination_masked: match method {
                PayoutMethod::Crypto => format!("TRC20 •••• {suffix}"),
                PayoutMethod::Fiat => format!("Bank •••• {suffix}"),
            },
            tx_hash: None,
            timeline: vec![TimelineEntry::new(
                requested_at,
                "Withdrawal requested",
                "Request submitted",
            )],
            decline_message: None,
            acted_at: None,
            acted_by: None,
        });
    }

    const METHODS: [PayoutMethod; 3] = [PayoutMethod::Crypto, PayoutMethod::Fiat, PayoutMethod::Crypto];
    const STATUSES: [PayoutStatus; 5] = [
        PayoutStatus::Approved,
        PayoutStatus::Declined,
        PayoutStatus::Escalate,
        PayoutStatus::Approved,
        PayoutStatus::Declined,
    ];
    const AMOUNTS: [i64; 5] = [75, 200, 150, 95, 180];
    const SUFFIXES: [&str; 3] = ["8F2A", "1A7C", "9B3E"];

    for i in 0..8 {
        let player = &players[(i + 3) % players.len()];
        let status = STATUSES[i % STATUSES.len()];
        let method = METHODS[i % METHODS.len()];
        let req_hours = 8 + i as i64 * 6;
        let requested_at = hours_ago(now, req_hours);
        let (label, note) = match status {
            PayoutStatus::Approved => ("Approved", "Payout executed"),
            PayoutStatus::Declined => ("Declined", "Declined by agent"),
            _ => ("Escalate", "Escalated to support"),
        };
        payouts.push(Payout {
            id: format!("po_{}", 1001 + i),
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            amount: Money::from(AMOUNTS[i % AMOUNTS.len()]),
            method,
            status,
            requested_at,
            destination_masked: match method {
                PayoutMethod::Crypto => format!("TRC20 •••• {}", SUFFIXES[i % SUFFIXES.len()]),
                PayoutMethod::Fiat => format!("Bank •••• {}", 1120 + i),
            },
            tx_hash: (status == PayoutStatus::Approved).then(ids::tx_hash),
            timeline: vec![
                TimelineEntry::new(requested_at, "Withdrawal requested", "Request submitted"),
                TimelineEntry::new(hours_ago(now, req_hours - 1), label, note),
            ],
            decline_message: None,
            acted_at: None,
            acted_by: None,
        });
    }

    payouts.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
    payouts
}

/// Newest statement first; the dashboard treats the head as current.
pub fn statements(now: DateTime<Utc>) -> Vec<Statement> {
    let rows = [
        ("stmt_current", "Week 06 (Mon–Sun)", StatementStatus::Paid, 14_200, 12_400, Decimal::new(35, 3), cents(-3_250), cents(40_125), Some(0)),
        ("stmt_02", "Week 02 (Mon–Sun)", StatementStatus::Paid, 12_800, 11_200, Decimal::new(35, 3), cents(-4_550), cents(34_650), Some(1)),
        ("stmt_03", "Week 03 (Mon–Sun)", StatementStatus::Pending, 9_400, 8_600, Decimal::new(3, 2), Money::ZERO, cents(25_800), None),
        ("stmt_01", "Week 01 (Mon–Sun)", StatementStatus::Paid, 10_200, 9_100, Decimal::new(32, 3), cents(1_200), cents(30_320), Some(8)),
        ("stmt_04", "Week 04 (Mon–Sun)", StatementStatus::Adjusted, 11_500, 10_000, Decimal::new(35, 3), cents(-2_000), cents(33_000), Some(-5)),
        ("stmt_00", "Week 52 (Mon–Sun)", StatementStatus::Paid, 8_900, 7_800, Decimal::new(3, 2), Money::ZERO, cents(23_400), Some(15)),
    ];
    rows.into_iter()
        .map(|(id, week, status, ggr, ngr, rate, adjustments, final_payout, paid)| Statement {
            id: id.to_string(),
            week_label: week.to_string(),
            status,
            ggr: Money::from(ggr),
            ngr: Money::from(ngr),
            commission_rate: rate,
            adjustments,
            final_payout,
            paid_at: paid.map(|d| days_ago(now, d)),
            ledger_ref_id: format!("ref_{id}"),
        })
        .collect()
}

pub fn goals() -> Vec<Goal> {
    let rows = [
        ("g1", GoalKind::ClanWide, "Active Sessions", "Reach 220 total play sessions across the clan.", 68),
        ("g2", GoalKind::AllMember, "All Members Participate", "Every clan member plays at least once this week.", 82),
        ("g3", GoalKind::Individual, "Consistency Streaks", "10 players hit a 3-day activity streak.", 54),
        ("g4", GoalKind::ClanWide, "Weekly GGR Target", "Clan-wide GGR exceeds 15,000 USDT this week.", 71),
        ("g5", GoalKind::Individual, "New Player Onboarding", "5 new players complete first deposit.", 80),
    ];
    rows.into_iter()
        .map(|(id, kind, title, description, progress)| Goal {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description: description.to_string(),
            progress,
            remaining_label: "3d 14h remaining".to_string(),
        })
        .collect()
}

pub fn wars(now: DateTime<Utc>) -> Vec<War> {
    let rows = [
        ("war_12", "Weekend Sprint", WarStatus::Active, 0, -1, 50, "Clan Orion", true, 1120, 980),
        ("war_13", "Midweek Clash", WarStatus::Upcoming, -2, -3, 35, "Clan Nova", false, 0, 0),
        ("war_11", "Last Week Finals", WarStatus::Past, 8, 7, 50, "Clan Vega", true, 780, 820),
        ("war_10", "January Cup", WarStatus::Past, 15, 14, 50, "Clan Sirius", true, 950, 890),
        ("war_14", "Spring Showdown", WarStatus::Upcoming, -5, -6, 75, "Clan Phoenix", false, 0, 0),
    ];
    rows.into_iter()
        .map(|(id, name, status, starts, ends, fee, opponent, registered, you, them)| War {
            id: id.to_string(),
            name: name.to_string(),
            status,
            starts_at: days_ago(now, starts),
            ends_at: days_ago(now, ends),
            entry_fee: Money::from(fee),
            opponent: opponent.to_string(),
            registered,
            score_you: you,
            score_them: them,
        })
        .collect()
}

pub fn player_deposits(players: &[Player], now: DateTime<Utc>) -> Vec<PlayerFiatDeposit> {
    const STATUSES: [DepositStatus; 10] = [
        DepositStatus::Completed,
        DepositStatus::Completed,
        DepositStatus::Pending,
        DepositStatus::Completed,
        DepositStatus::Failed,
        DepositStatus::Completed,
        DepositStatus::Pending,
        DepositStatus::Completed,
        DepositStatus::Completed,
        DepositStatus::Completed,
    ];
    if players.is_empty() {
        return Vec::new();
    }
    CONVERSIONS
        .iter()
        .enumerate()
        .map(|(i, (_, fiat, usdt))| {
            let player = &players[i % players.len()];
            PlayerFiatDeposit {
                id: format!("pdep_{}", i + 1),
                player_id: player.id.clone(),
                player_name: player.name.clone(),
                fiat_amount: fiat.to_string(),
                usdt_amount: cents(*usdt),
                status: STATUSES[i],
                at: hours_ago(now, 2 + i as i64 * 6),
            }
        })
        .collect()
}

pub fn alerts() -> Vec<Alert> {
    let rows = [
        ("al1", Severity::High, "Low wallet balance", "Prefunding may block new player deposits. Top up to avoid pending conversions.", "/dashboard/wallet"),
        ("al2", Severity::Medium, "1 failed fiat payout", "Review payout details and confirm settlement externally.", "/dashboard/payouts"),
        ("al3", Severity::Low, "Invite quota running low", "You have fewer than 10 invites remaining.", "/dashboard/invites"),
        ("al4", Severity::Low, "2 pending player conversions", "Player deposits awaiting wallet prefund. Add funds to clear.", "/dashboard/wallet"),
        ("al5", Severity::Medium, "Clan War registration closes in 24h", "Weekend Sprint entry closes soon. Register to lock fee.", "/dashboard/clan/wars"),
        ("al6", Severity::Low, "Weekly statement ready", "Week 06 commission has been paid to your wallet.", "/dashboard/commissions"),
    ];
    rows.into_iter()
        .map(|(id, severity, title, description, deep_link)| Alert {
            id: id.to_string(),
            severity,
            title: title.to_string(),
            description: description.to_string(),
            deep_link: deep_link.to_string(),
        })
        .collect()
}
