fn main() -> anyhow::Result<()> {
    homa_report_lib::run()
}
