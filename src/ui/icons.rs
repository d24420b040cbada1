pub struct Icons;

impl Icons {
    pub const PHONE: &str = "📱";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const PERSON: &str = "👤";
    pub const INVOICE: &str = "🧾";
    pub const DATABASE: &str = "🗄️";
    pub const STATS: &str = "📊";
    pub const EMPTY: &str = "∅";
}
