//! Content catalog — every label, text, and link the bot can show.
//!
//! Pure data. Each menu is a closed enum whose variants know their exact
//! button label; parsing user input is an exact, case-sensitive label match.

/// A fixed set of options shown as one reply keyboard.
pub trait MenuOption: Copy + Sized + 'static {
    /// Every option, in keyboard order.
    const ALL: &'static [Self];

    /// Exact text the user's button sends.
    fn label(self) -> &'static str;

    /// Parse user input into an option. Exact match only.
    fn from_label(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|opt| opt.label() == text)
    }
}

// ── Shared labels and links ─────────────────────────────────────────

/// Universal "back to main menu" label.
pub const BACK: &str = "⬅️ В меню";

/// Label sent after the user has paid.
pub const PAID: &str = "✅ Я оплатила";

/// Advances a case narrative by one step.
pub const CASE_NEXT: &str = "➡️ Дальше";

/// The entry command.
pub const START_COMMAND: &str = "/start";

pub const PAY_URL: &str = "https://expertsblog.tb.ru/zapusk/plan";
pub const MINI_COURSE_CHAT_URL: &str = "https://t.me/+7cKQ7WhXxU9kMWNi";

// ── Prompts ─────────────────────────────────────────────────────────

pub const GREETING: &str = "Привет.\nЯ — короткий путь к продажам без выгорания.\n\nС чего начнём?";
pub const MAIN_PROMPT: &str = "Выбирай 👇";
pub const BACK_TO_MENU: &str = "Возвращаю в меню 👇";
pub const IDLE_NUDGE: &str = "Жми кнопки. Я тут не для переписки 😉";

pub const VIDEOS_INTRO: &str =
    "Ок, без долгих вступлений.\nХочешь продажи — смотри видео. Потом думаешь.\n\nВыбирай 👇";
pub const VIDEOS_NEXT: &str = "Выбирай следующее 👇";
pub const VIDEOS_RETRY: &str = "Выбери пункт кнопкой 👇";
pub const WATCH_BUTTON: &str = "▶️ Смотреть";

pub const FAQ_INTRO: &str = "Скорее всего, ты не тупишь. Ты просто не хочешь купить ерунду.\nИ правильно делаешь.\n\nВыбирай вопрос — отвечаю (и даю ссылки) 👇";
pub const FAQ_NEXT: &str = "Хочешь — выбери следующий вопрос 👇";
pub const FAQ_RETRY: &str = "Выбери вопрос кнопкой 👇";

pub const QUALIFIER_INTRO: &str = "🔎 Быстро и честно.";
pub const QUALIFIER_Q1: &str = "У тебя уже есть блог?";
pub const QUALIFIER_Q2: &str = "Твоя цель на ближайшие 7–14 дней?";
pub const QUALIFIER_RETRY: &str = "Выбери вариант кнопкой 👇";
pub const QUALIFIER_RESULT: &str = "✅ *Подойдёт ли тебе это?*\n\nДержи 3 статьи — по делу 👇";

pub const CASES_INTRO: &str = "📌 Выбирай кейс 👇";
pub const CASES_NEXT: &str = "Выбирай следующий кейс 👇";
pub const CASES_PICK_FIRST: &str = "Сначала выбери кейс 👇";
pub const CASES_RETRY: &str = "Нажми кнопку 👇";
pub const CASES_FINISHED: &str = "Возвращаю в меню.";
pub const CASE_WEEK_TEXT: &str = "💰 *100 тр без блога за неделю*\n\nСмотри по кнопке 👇";
pub const CASE_WEEK_BUTTON: &str = "▶️ Смотреть кейс";
pub const CASE_WEEK_URL: &str = "https://t.me/YourProducerOnline/424";

pub const PAY_PROMPT: &str = "Жми кнопку 👇";
pub const PAY_BUTTON: &str = "💳 Перейти к оплате";
pub const PAY_INSTRUCTIONS: &str =
    "После оплаты нажми *«✅ Я оплатила»* — дам доступ в чат мини-курса.";

pub const PAID_CONFIRMATION: &str = "✅ Принято.\nВот чат мини-курса — заходи 👇";
pub const COURSE_BUTTON: &str = "🎓 Войти в чат мини-курса";

pub const SUPPORT_ACK: &str = "Ок. Человека позвала.";

// ── Main menu ───────────────────────────────────────────────────────

/// Top-level options on the main keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainOption {
    Videos,
    Faq,
    Qualifier,
    Cases,
    Pay,
    Support,
}

impl MenuOption for MainOption {
    const ALL: &'static [Self] = &[
        Self::Videos,
        Self::Faq,
        Self::Qualifier,
        Self::Cases,
        Self::Pay,
        Self::Support,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Videos => "🚀 Начать (видео)",
            Self::Faq => "🎥 Вопросы (FAQ)",
            Self::Qualifier => "🔎 Подойдёт ли мне?",
            Self::Cases => "📌 Кейсы",
            Self::Pay => "💳 Оплатить",
            Self::Support => "🤝 Поддержка",
        }
    }
}

// ── Videos ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Video {
    Benefit,
    LaunchMistakes,
    NoBlogWeek,
}

impl MenuOption for Video {
    const ALL: &'static [Self] = &[Self::Benefit, Self::LaunchMistakes, Self::NoBlogWeek];

    fn label(self) -> &'static str {
        match self {
            Self::Benefit => "1️⃣ Выгода",
            Self::LaunchMistakes => "2️⃣ 3 ошибки запуска",
            Self::NoBlogWeek => "3️⃣ 100 тр без блога за неделю",
        }
    }
}

impl Video {
    /// Markdown caption with a bold title line.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Benefit => "🔥 *Выгода*\nС этого начинаем.",
            Self::LaunchMistakes => "🚫 *3 ошибки запуска продаж*\nЧтобы не слить запуск.",
            Self::NoBlogWeek => "💰 *100 тр без блога за неделю*\nСмотри разбор.",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Self::Benefit => "https://t.me/YourProducerOnline/405",
            Self::LaunchMistakes => "https://t.me/YourProducerOnline/415",
            Self::NoBlogWeek => "https://t.me/YourProducerOnline/424",
        }
    }
}

// ── FAQ ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaqQuestion {
    Budget,
    Trust,
    Guarantees,
    Fit,
    Earnings,
}

impl MenuOption for FaqQuestion {
    const ALL: &'static [Self] = &[
        Self::Budget,
        Self::Trust,
        Self::Guarantees,
        Self::Fit,
        Self::Earnings,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Budget => "1️⃣ Бюджет",
            Self::Trust => "2️⃣ Доверие",
            Self::Guarantees => "3️⃣ Гарантии",
            Self::Fit => "4️⃣ Подойдёт ли",
            Self::Earnings => "5️⃣ Заработок",
        }
    }
}

impl FaqQuestion {
    /// Markdown answer body. Never contains the supplementary links.
    pub fn answer(self) -> &'static str {
        match self {
            Self::Budget => "💸 *Какой бюджет нужен для запуска продаж?*\n\nБюджет = 0 рублей.",
            Self::Trust => "📌 *Какие у меня реализованные проекты и почему мне можно доверять?*\n\n50+ проектов в разных нишах.",
            Self::Guarantees => "🛡 *Какие гарантии ты получаешь?*\n\nВозврат денег, если не запустим тебя.",
            Self::Fit => "⚙️ *Подойдёт ли тебе эта технология?*\n\nЛучшую технологию подберем на разборе твоей ситуации.",
            Self::Earnings => "📈 *Сколько ты реально сможешь заработать?*\n\nСмотри кейсы и механику — там реальность.",
        }
    }

    /// Supplementary links, in display order. May be empty.
    pub fn links(self) -> &'static [&'static str] {
        match self {
            Self::Budget => &["https://t.me/YourProducerOnline/429"],
            Self::Trust => &[
                "https://t.me/YourProducerOnline/432",
                "https://t.me/YourProducerOnline/433",
            ],
            Self::Guarantees => &["https://t.me/YourProducerOnline/430"],
            Self::Fit => &["https://t.me/YourProducerOnline/428"],
            Self::Earnings => &[
                "https://t.me/YourProducerOnline/417",
                "https://t.me/YourProducerOnline/420",
            ],
        }
    }
}

// ── Qualifier ───────────────────────────────────────────────────────

/// Answer to "do you already have a blog?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlogAnswer {
    HasBlog,
    StartingOut,
}

impl MenuOption for BlogAnswer {
    const ALL: &'static [Self] = &[Self::HasBlog, Self::StartingOut];

    fn label(self) -> &'static str {
        match self {
            Self::HasBlog => "Да",
            Self::StartingOut => "Нет / начинаю",
        }
    }
}

/// Answer to "what is your goal for the next 7–14 days?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalAnswer {
    FirstSales,
    Stability,
    Automation,
}

impl MenuOption for GoalAnswer {
    const ALL: &'static [Self] = &[Self::FirstSales, Self::Stability, Self::Automation];

    fn label(self) -> &'static str {
        match self {
            Self::FirstSales => "Первые продажи",
            Self::Stability => "Стабильность",
            Self::Automation => "Автоматизация",
        }
    }
}

/// The three articles sent when the qualifier completes: (button label, url).
pub const QUALIFIER_ARTICLES: [(&str, &str); 3] = [
    (
        "📄 Как устроена воронка?",
        "https://salebot.site/md/voronka_Reels",
    ),
    (
        "📄 Как запустить быстро продажи?",
        "https://salebot.site/md/zapuskblog",
    ),
    (
        "📄 Волшебная таблетка",
        "https://salebot.site/md/tabletkinet",
    ),
];

// ── Cases ───────────────────────────────────────────────────────────

/// Options on the cases keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseItem {
    /// Direct content: one link, no narrative.
    NoBlogWeek,
    Story(CaseStory),
}

impl MenuOption for CaseItem {
    const ALL: &'static [Self] = &[
        Self::NoBlogWeek,
        Self::Story(CaseStory::Julia),
        Self::Story(CaseStory::Elena),
        Self::Story(CaseStory::Darya),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NoBlogWeek => "💰 100 тр без блога за неделю",
            Self::Story(story) => story.label(),
        }
    }
}

/// A customer case told as a fixed sequence of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStory {
    Julia,
    Elena,
    Darya,
}

impl CaseStory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Julia => "Юлия — 2 млн",
            Self::Elena => "Елена — 1 млн",
            Self::Darya => "Дарья — 700k",
        }
    }

    /// Markdown steps, shown one per "next".
    pub fn steps(self) -> &'static [&'static str] {
        match self {
            Self::Julia => &[
                "📌 *Кейс Юлии (коучинг)*\n\n10 лет блог работал сам. Потом рынок сказал: «а теперь плати или страдай».",
                "Мы сделали не «больше контента», а *умнее контент*:\n• смысл\n• боль\n• воронка\n• система\n\nБез цирка и выгорания.",
                "Результат: *2 000 000 ₽ за 14 дней*.",
                "Хочешь так же — жми *«Оплатить»*.",
            ],
            Self::Elena => &[
                "📌 *Кейс Елены*\n\nПродажи были как погода — то солнце, то дождь.",
                "Собрали: упаковка + прогрев + воронка.",
                "Результат: *1 000 000 ₽*.",
                "Хочешь повторяемость — жми *«Оплатить»*.",
            ],
            Self::Darya => &[
                "📌 *Кейс Дарьи (маникюр)*\n\nБлог был, роста не было.",
                "Сделали: упаковка + контент + автоворонка.",
                "Результат: *700 000 ₽*.",
                "Хочешь так же — жми *«Оплатить»*.",
            ],
        }
    }

    /// Step `index`, or `None` once the narrative is exhausted.
    pub fn step(self, index: usize) -> Option<&'static str> {
        self.steps().get(index).copied()
    }
}
