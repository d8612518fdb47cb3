/// Which offset log timestamps are rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}
