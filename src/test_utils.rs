#[allow(dead_code)]
pub fn init_test_logger() {
    use std::io::Write as _;
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .format(|buf, record| {
            let bg = anstyle::Ansi256Color(236);
            let level_style = buf
                .default_level_style(record.level())
                .bg_color(Some(bg.into()));
            let dim = anstyle::Ansi256Color(250).on(bg);

            let module = record.module_path().unwrap_or("unknown");
            writeln!(
                buf,
                "{dim}[{dim:#}{level_style}{:<5}{level_style:#}{dim} {}]{dim:#} {}",
                record.level(),
                module.trim_start_matches("bernstein_coefficients::"),
                record.args()
            )
        })
        .try_init();
}
