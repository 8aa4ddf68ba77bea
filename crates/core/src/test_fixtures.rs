//! Ledger exports shared by unit tests.

/// Comparative balance sheet with one account in each bucket, a total bank
/// row and an unchanged equity account.
pub(crate) const BALANCE_SHEET_CSV: &str = "\
Acme Holdings Inc.,,,
Comparative Balance Sheet,,,
\"As of June 30, 2025\",,,
,,,
,,,
Financial Row,\"Amount (As of Jun 30, 2025)\",\"Comparison Amount (As of Mar 31, 2025)\",Variance
ASSETS,,,
Current Assets,,,
Bank,,,
1000 - Operating Cash,\"1,500.00\",\"1,000.00\",500.00
Total Bank,\"1,500.00\",\"1,000.00\",500.00
Accounts Receivable,,,
\"1010 - Accounts Receivable\",\"100,000.00\",\"800,026.36\",\"(700,026.36)\"
Fixed Assets,,,
1500 - Domain Name Costs,\"2,000.00\",0.00,\"2,000.00\"
Total Assets,\"(596,500.00)\",\"801,026.36\",\"(697,526.36)\"
Liabilities & Equity,,,
Current Liabilities,,,
2100 - Accrued Payroll,300.00,100.00,200.00
Equity,,,
3000 - Common Stock,\"5,000.00\",\"4,000.00\",\"1,000.00\"
3900 - Net Income,\"1,200.00\",0.00,\"1,200.00\"
3950 - Retained Earnings,\"7,000.00\",\"7,000.00\",0.00
";

/// Flat ledger with ISO dates out of order.
pub(crate) const FLAT_LEDGER_CSV: &str = "\
Date,Account,Account Type,Description,Amount,Reference
2025-04-15,1010 - Accounts Receivable,Current Asset,Customer invoices,\"(1,250.00)\",INV-100
2025-03-01,4000 - Net Income,Equity,Quarter result,\"5,000.00\",
2025-06-30,1500 - Office Equipment,Fixed Asset,New laptops,\"$2,400.00\",PO-7
";
